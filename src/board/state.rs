use parking_lot::{Mutex, MutexGuard};

use super::{CastlingRights, Color, Piece, PieceKind, Square, SquareSet};

/// Read access to square occupants, the only view piece rules get of the
/// board.
pub trait OccupantLookup {
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Color)>;

    #[inline]
    fn is_empty(&self, sq: Square) -> bool {
        self.occupant(sq).is_none()
    }
}

impl<F> OccupantLookup for F
where
    F: Fn(Square) -> Option<(PieceKind, Color)>,
{
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self(sq)
    }
}

/// The 8x8 grid of occupants, indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[must_use]
    pub fn empty() -> Self {
        Board::default()
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.0][sq.1]
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.0][sq.1] = piece;
    }

    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.0][sq.1].take()
    }

    /// Rows from row 0 (rank 8) down to row 7 (rank 1)
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.squares.iter()
    }
}

impl OccupantLookup for Board {
    #[inline]
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.piece_at(sq).map(Piece::info)
    }
}

/// Side to move behind a lock: a background search may read it while the
/// turn-processing task flips it.
///
/// Cloning copies the value into a fresh, independent lock.
#[derive(Debug)]
pub(crate) struct TurnLock(Mutex<Color>);

impl TurnLock {
    pub(crate) fn new(color: Color) -> Self {
        TurnLock(Mutex::new(color))
    }

    #[inline]
    pub(crate) fn get(&self) -> Color {
        *self.0.lock()
    }

    #[inline]
    pub(crate) fn set(&self, color: Color) {
        *self.0.lock() = color;
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, Color> {
        self.0.lock()
    }
}

impl Clone for TurnLock {
    fn clone(&self) -> Self {
        TurnLock::new(self.get())
    }
}

impl PartialEq for TurnLock {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for TurnLock {}

/// Everything a FEN string describes, plus the per-color occupancy index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: TurnLock,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) pieces_by_color: [SquareSet; 2],
}

impl GameState {
    pub(crate) fn empty() -> Self {
        GameState {
            board: Board::empty(),
            turn: TurnLock::new(Color::White),
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            pieces_by_color: [SquareSet::EMPTY; 2],
        }
    }

    /// Place a piece, keeping the color index in sync.
    ///
    /// The `moved` flag is derived from the square the way a freshly parsed
    /// position would see it.
    pub(crate) fn place(&mut self, sq: Square, kind: PieceKind, color: Color) {
        self.remove(sq);
        let mut piece = Piece::new(kind, color);
        piece.moved = !starts_on(kind, color, sq);
        self.board.set(sq, Some(piece));
        self.pieces_by_color[color.index()].insert(sq);
    }

    /// Put an existing piece on `sq`, keeping its `moved` flag.
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.remove(sq);
        self.board.set(sq, Some(piece));
        self.pieces_by_color[piece.color.index()].insert(sq);
    }

    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.board.take(sq)?;
        self.pieces_by_color[piece.color.index()].remove(sq);
        Some(piece)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn.get()
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn pieces_of(&self, color: Color) -> SquareSet {
        self.pieces_by_color[color.index()]
    }

    pub(crate) fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color).iter().find(|&sq| {
            self.board.piece_at(sq).map(|p| p.kind) == Some(PieceKind::King)
        })
    }
}

/// Whether `sq` is the square this piece kind occupies before it has ever
/// moved. Only pawns, kings and rooks carry rule state tied to it.
fn starts_on(kind: PieceKind, color: Color, sq: Square) -> bool {
    match kind {
        PieceKind::Pawn => sq.row() == color.pawn_start_row(),
        PieceKind::King => sq == Square(color.back_row(), 4),
        PieceKind::Rook => sq.row() == color.back_row() && (sq.col() == 0 || sq.col() == 7),
        _ => true,
    }
}
