//! Threaded game session: one background turn task per running game.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use super::config::{GameConfig, PlayerKind};
use super::error::SessionError;
use super::player::{build_player, Player, TurnContext};
use crate::board::{
    BoardController, Color, DrawReason, GameOutcome, MoveError, MoveRequest, PieceKind, Square,
    SquareSet,
};
use crate::sync::StopFlag;

/// Where a session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// The turn task is waiting on `turn`'s player
    Running { turn: Color },
    /// No turn task; `resume` continues the game
    Paused { turn: Color },
    Finished(GameOutcome),
}

/// Active turn task state
struct TurnJob {
    stop: StopFlag,
    handle: JoinHandle<()>,
}

impl TurnJob {
    /// Stop the task and wait for the thread to finish
    fn stop_and_wait(self) {
        self.stop.stop();
        let _ = self.handle.join();
    }
}

/// Shared between the session and its task: whether the task is alive.
#[derive(Default)]
struct TaskSignal {
    running: Mutex<bool>,
    done: Condvar,
}

/// Clears the running flag when the turn task exits, however it exits.
struct RunningGuard(Arc<TaskSignal>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        *self.0.running.lock() = false;
        self.0.done.notify_all();
    }
}

type SenderSlot = Arc<Mutex<Option<Sender<MoveRequest>>>>;

/// A game between two players, driven by a background turn task.
///
/// The UI thread reads snapshots and submits human moves; the task asks the
/// current player for a move each turn and applies it.
pub struct GameSession {
    controller: Arc<Mutex<BoardController>>,
    players: [Arc<dyn Player>; 2],
    move_sender: SenderSlot,
    signal: Arc<TaskSignal>,
    job: Option<TurnJob>,
}

impl GameSession {
    /// Validate `config` and set up the starting position. The game does not
    /// run until [`start`](Self::start).
    pub fn new(config: &GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let mut controller = BoardController::from_fen(&config.starting_fen)?;
        controller.update_terminal_state();
        let players: [Arc<dyn Player>; 2] = [
            Arc::from(build_player(config, Color::White)),
            Arc::from(build_player(config, Color::Black)),
        ];
        log::debug!(
            "New game: {} (white) vs {} (black)",
            config.white,
            config.black
        );
        Ok(GameSession {
            controller: Arc::new(Mutex::new(controller)),
            players,
            move_sender: Arc::new(Mutex::new(None)),
            signal: Arc::new(TaskSignal::default()),
            job: None,
        })
    }

    /// Spawn the turn task.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(SessionError::AlreadyRunning);
        }
        if self.controller.lock().is_game_over() {
            return Err(SessionError::GameOver);
        }
        if let Some(old) = self.job.take() {
            old.stop_and_wait();
        }

        let stop = StopFlag::new();
        *self.signal.running.lock() = true;
        let guard = RunningGuard(Arc::clone(&self.signal));
        let task = TurnTask {
            controller: Arc::clone(&self.controller),
            players: self.players.clone(),
            move_sender: Arc::clone(&self.move_sender),
            stop: stop.clone(),
        };
        let handle = thread::Builder::new()
            .name("turn-task".to_string())
            .spawn(move || {
                let _guard = guard;
                task.run();
            })
            .map_err(SessionError::Spawn)?;

        self.job = Some(TurnJob { stop, handle });
        Ok(())
    }

    /// Stop the turn task, cancelling a pending human wait or search, and
    /// join it. The position is kept as it was before the cancelled turn.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if !self.is_running() {
            return Err(SessionError::NotRunning);
        }
        self.halt();
        log::info!("Game paused");
        Ok(())
    }

    /// Continue a paused game with a fresh turn task.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.start()?;
        log::info!("Game resumed");
        Ok(())
    }

    fn halt(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop.stop();
            self.move_sender.lock().take();
            job.stop_and_wait();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        *self.signal.running.lock()
    }

    /// Hand a move to the human player whose turn it is.
    ///
    /// Moves that are not legal are rejected here; nothing is queued.
    pub fn submit_move(&self, request: MoveRequest) -> Result<(), SessionError> {
        let turn = {
            let mut controller = self.controller.lock();
            if controller.is_game_over() {
                return Err(SessionError::GameOver);
            }
            let turn = controller.turn();
            if self.players[turn.index()].kind() != PlayerKind::Human {
                return Err(SessionError::NoPendingTurn);
            }
            let own_piece = match controller.piece_info(request.from) {
                None => return Err(MoveError::NoPiece { at: request.from }.into()),
                Some((_, color)) => color == turn,
            };
            if !own_piece || !controller.get_legal_moves(request.from).contains(request.to) {
                log::warn!("Rejected move {request} for {turn}");
                return Err(MoveError::InvalidMoveRequest {
                    from: request.from,
                    to: request.to,
                }
                .into());
            }
            turn
        };
        // One request per channel; the task opens a new one if it rejects it
        let sender = self
            .move_sender
            .lock()
            .take()
            .ok_or(SessionError::NoPendingTurn)?;
        sender.send(request).map_err(|_| SessionError::NotRunning)?;
        log::debug!("{turn} submitted {request}");
        Ok(())
    }

    /// Color of the human player currently waiting for a move, if any.
    #[must_use]
    pub fn awaiting_move(&self) -> Option<Color> {
        if !self.is_running() || self.move_sender.lock().is_none() {
            return None;
        }
        let controller = self.controller.lock();
        let turn = controller.turn();
        let human = self.players[turn.index()].kind() == PlayerKind::Human;
        (human && !controller.is_game_over()).then_some(turn)
    }

    /// End the game as a draw when the fifty-move or repetition rule holds.
    pub fn claim_draw(&self, color: Color) -> Result<DrawReason, SessionError> {
        let reason = {
            let mut controller = self.controller.lock();
            if controller.is_game_over() {
                return Err(SessionError::GameOver);
            }
            controller.accept_draw_claim().ok_or_else(|| {
                log::warn!("{color} claimed a draw, but none is available");
                SessionError::DrawNotClaimable
            })?
        };
        self.end_pending_turn();
        Ok(reason)
    }

    /// `color` gives up and the opponent wins.
    pub fn resign(&self, color: Color) -> Result<(), SessionError> {
        {
            let mut controller = self.controller.lock();
            if controller.is_game_over() {
                return Err(SessionError::GameOver);
            }
            controller.resign(color);
        }
        self.end_pending_turn();
        Ok(())
    }

    /// Wake a task blocked on a human move so it notices the game ended.
    fn end_pending_turn(&self) {
        if let Some(job) = &self.job {
            job.stop.stop();
        }
        self.move_sender.lock().take();
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let controller = self.controller.lock();
        if let Some(outcome) = controller.outcome() {
            return SessionStatus::Finished(outcome);
        }
        let turn = controller.turn();
        drop(controller);
        if self.is_running() {
            SessionStatus::Running { turn }
        } else {
            SessionStatus::Paused { turn }
        }
    }

    /// Block until the turn task exits, then report the outcome. Returns
    /// `None` if the task stopped without the game ending (paused).
    pub fn wait_until_finished(&self) -> Option<GameOutcome> {
        let mut running = self.signal.running.lock();
        while *running {
            self.signal.done.wait(&mut running);
        }
        drop(running);
        self.controller.lock().outcome()
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.controller.lock().fen()
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.controller.lock().turn()
    }

    #[must_use]
    pub fn piece_info(&self, pos: Square) -> Option<(PieceKind, Color)> {
        self.controller.lock().piece_info(pos)
    }

    #[must_use]
    pub fn legal_moves(&self, pos: Square) -> SquareSet {
        self.controller.lock().get_legal_moves(pos)
    }

    /// Owned snapshot of the current position
    #[must_use]
    pub fn snapshot(&self) -> BoardController {
        self.controller.lock().clone()
    }

    #[must_use]
    pub fn player_kind(&self, color: Color) -> PlayerKind {
        self.players[color.index()].kind()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Everything the background task owns.
struct TurnTask {
    controller: Arc<Mutex<BoardController>>,
    players: [Arc<dyn Player>; 2],
    move_sender: SenderSlot,
    stop: StopFlag,
}

impl TurnTask {
    /// Publish a fresh sender for the next human request. `None` once the
    /// task has been told to stop.
    fn open_channel(&self) -> Option<Receiver<MoveRequest>> {
        let (sender, requests) = mpsc::channel();
        let mut slot = self.move_sender.lock();
        if self.stop.is_stopped() {
            return None;
        }
        *slot = Some(sender);
        Some(requests)
    }

    fn run(self) {
        while self.play_one_turn() {}
        log::debug!("Turn task exiting");
    }

    /// Ask the current player for a move until one is accepted. Returns
    /// false when the task should exit.
    fn play_one_turn(&self) -> bool {
        if self.stop.is_stopped() {
            return false;
        }
        let (color, position) = {
            let controller = self.controller.lock();
            if let Some(outcome) = controller.outcome() {
                log::info!("Game over: {outcome}");
                return false;
            }
            (controller.turn(), controller.clone())
        };

        let Some(requests) = self.open_channel() else {
            return false;
        };
        let mut ctx = TurnContext {
            color,
            position,
            requests,
            stop: self.stop.clone(),
        };

        let player = &self.players[color.index()];
        let applied = loop {
            let Some(request) = player.choose_move(&mut ctx) else {
                break false;
            };
            let mut controller = self.controller.lock();
            if self.stop.is_stopped() || controller.is_game_over() || controller.turn() != color
            {
                break false;
            }
            match controller.play_turn(request) {
                Ok(kind) => {
                    log::debug!("{color} played {request} ({kind:?})");
                    break true;
                }
                Err(err) => {
                    log::warn!("{color} requested an invalid move: {err}");
                    drop(controller);
                    match self.open_channel() {
                        Some(requests) => ctx.requests = requests,
                        None => break false,
                    }
                }
            }
        };
        self.move_sender.lock().take();

        if !applied {
            if let Some(outcome) = self.controller.lock().outcome() {
                log::info!("Game over: {outcome}");
            }
        }
        applied
    }
}
