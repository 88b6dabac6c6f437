use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest side of any catalog shape.
pub const MAX_SHAPE_SIZE: usize = 4;

/// A falling piece: kind, current orientation and board position.
///
/// Pieces are immutable values. Movement and rotation return new `Piece` instances,
/// so speculative placements never touch the live piece.
///
/// # Coordinate System
///
/// - `(x, y)` is the board cell of the shape's top-left corner
/// - X increases rightward (columns), Y increases downward (rows)
/// - Both coordinates are signed: candidate placements may start left of the board
///   or above its top row
///
/// # Example
///
/// ```
/// use neuroblox_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::new(PieceKind::T, PiecePosition::new(4, 0));
/// let moved = piece.translated(1, 0);
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.shape().width(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    shape: PieceShape,
    position: PiecePosition,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "T#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!("missing '#' in format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let mut kind_chars = kind_str.chars();
        let (Some(kind_char), None) = (kind_chars.next(), kind_chars.next()) else {
            return Err(serde::de::Error::custom(format!(
                "piece kind must be single character, got '{kind_str}'"
            )));
        };
        let kind = PieceKind::from_char(kind_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_char}")))?;

        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            serde::de::Error::custom(format!("missing '@' in format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let rotation = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation > 3 {
            return Err(serde::de::Error::custom(format!(
                "rotation must be 0-3, got {rotation}"
            )));
        }

        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            serde::de::Error::custom(format!("missing ',' in format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let x = x_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        Ok(Piece::new(kind, PiecePosition::new(x, y)).rotated_right_by(rotation))
    }
}

impl Piece {
    /// Creates a piece in its template orientation at the given position.
    #[must_use]
    pub fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            kind,
            rotation: PieceRotation::default(),
            shape: kind.shape(),
            position,
        }
    }

    /// Creates a freshly spawned piece for a board of the given width.
    ///
    /// The piece is horizontally centered (`width / 2 - shape_width / 2`) on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width / 2).saturating_sub(shape.width() / 2);
        Self::new(kind, PiecePosition::new(to_coord(x), 0))
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns board coordinates of every filled cell of the piece.
    ///
    /// Coordinates may lie outside the board; callers check bounds.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { x: x0, y: y0 } = self.position;
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (x0 + to_coord(dx), y0 + to_coord(dy)))
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.translated(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn moved_to(&self, position: PiecePosition) -> Self {
        Self { position, ..*self }
    }

    /// Rotates the shape 90° clockwise about its own frame, keeping the position.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_right_by(&self, times: u8) -> Self {
        (0..times).fold(*self, |piece, _| piece.rotated_right())
    }

    /// Returns the piece after 0, 1, 2 and 3 clockwise rotations, in place.
    #[must_use]
    pub fn rotations(&self) -> ArrayVec<Self, 4> {
        let mut rotations = ArrayVec::new();
        let mut piece = *self;
        for _ in 0..4 {
            rotations.push(piece);
            piece = piece.rotated_right();
        }
        rotations
    }
}

/// Board position of a piece's top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Number of clockwise rotations applied since the piece spawned.
///
/// - `0`: template orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub const fn new(count: u8) -> Self {
        Self(count % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn count(self) -> u8 {
        self.0
    }
}

/// Rectangular binary mask of a piece, at most 4×4.
///
/// Row `y` is stored as a bitmask where bit `x` is set when the cell is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Builds a shape from a 0/1 matrix.
    ///
    /// Panics (at compile time for constants) if the matrix is larger than 4×4 or empty.
    #[must_use]
    pub const fn from_matrix<const W: usize, const H: usize>(cells: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut filled = false;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if cells[y][x] != 0 {
                    rows[y] |= 1 << x;
                    filled = true;
                }
                x += 1;
            }
            y += 1;
        }
        assert!(filled, "piece shape must have at least one filled cell");
        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (W as u8, H as u8);
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn is_filled(self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && (self.rows[y] & (1 << x)) != 0
    }

    /// Returns `(dx, dy)` offsets of filled cells, row by row.
    pub fn filled_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height()).flat_map(move |y| {
            (0..self.width()).filter_map(move |x| self.is_filled(x, y).then_some((x, y)))
        })
    }

    /// Rotates the mask 90° clockwise.
    ///
    /// An `r×c` mask becomes `c×r`, with `out[x][r-1-y] = in[y][x]`.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        let r = self.height();
        let c = self.width();
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < r {
            let mut x = 0;
            while x < c {
                if self.is_filled(x, y) {
                    rows[x] |= 1 << (r - 1 - y);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }

    /// Returns the mask as a 0/1 matrix.
    #[must_use]
    pub fn to_matrix(self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| u8::from(self.is_filled(x, y)))
                    .collect()
            })
            .collect()
    }
}

/// Enum representing the type of piece.
///
/// Variants are declared in catalog order; that order defines the cell identifiers
/// (`I` = 1 ... `L` = 7) and the "next kinds" lookups of predictive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the template shape (spawn orientation) of this kind.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the cell identifier stored on the board (1-based catalog index).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Returns the kind `steps` positions after this one in catalog order, wrapping.
    ///
    /// ```
    /// use neuroblox_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::T.cycle_from(1), PieceKind::S);
    /// assert_eq!(PieceKind::L.cycle_from(1), PieceKind::I);
    /// ```
    #[must_use]
    pub const fn cycle_from(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % Self::LEN]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use neuroblox_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use neuroblox_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // I-piece
    PieceShape::from_matrix([[1, 1, 1, 1]]),
    // O-piece
    PieceShape::from_matrix([[1, 1], [1, 1]]),
    // T-piece
    PieceShape::from_matrix([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    PieceShape::from_matrix([[1, 1, 0], [0, 1, 1]]),
    // Z-piece
    PieceShape::from_matrix([[0, 1, 1], [1, 1, 0]]),
    // J-piece
    PieceShape::from_matrix([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    PieceShape::from_matrix([[0, 0, 1], [1, 1, 1]]),
];

pub(crate) fn to_coord(n: usize) -> i32 {
    i32::try_from(n).expect("board coordinate should fit in i32")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_templates() {
        assert_eq!(PieceKind::I.shape().to_matrix(), vec![vec![1, 1, 1, 1]]);
        assert_eq!(PieceKind::O.shape().to_matrix(), vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(
            PieceKind::T.shape().to_matrix(),
            vec![vec![0, 1, 0], vec![1, 1, 1]]
        );
        assert_eq!(
            PieceKind::J.shape().to_matrix(),
            vec![vec![1, 0, 0], vec![1, 1, 1]]
        );
        assert_eq!(
            PieceKind::L.shape().to_matrix(),
            vec![vec![0, 0, 1], vec![1, 1, 1]]
        );
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().filled_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_catalog_order_and_ids() {
        let chars: String = PieceKind::ALL.iter().map(|k| k.as_char()).collect();
        assert_eq!(chars, "IOTSZJL");
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.id()), i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn test_cycle_from_wraps() {
        assert_eq!(PieceKind::I.cycle_from(0), PieceKind::I);
        assert_eq!(PieceKind::Z.cycle_from(3), PieceKind::I);
        assert_eq!(PieceKind::J.cycle_from(3), PieceKind::O);
    }

    #[test]
    fn test_rotate_right_transposes_dimensions() {
        let t = PieceKind::T.shape();
        let rotated = t.rotated_right();
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        // [[0,1,0],[1,1,1]] rotated clockwise
        assert_eq!(rotated.to_matrix(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);

        let i = PieceKind::I.shape().rotated_right();
        assert_eq!(i.to_matrix(), vec![vec![1], vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let back = shape
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(back, shape, "{kind:?}");

            let piece = Piece::new(kind, PiecePosition::new(3, 5));
            let piece4 = piece.rotated_right_by(4);
            assert_eq!(piece4, piece, "{kind:?}");
        }
    }

    #[test]
    fn test_rotations_lists_each_orientation() {
        let piece = Piece::new(PieceKind::S, PiecePosition::new(2, 1));
        let rotations = piece.rotations();
        assert_eq!(rotations.len(), 4);
        assert_eq!(rotations[0], piece);
        assert_eq!(rotations[2], rotations[1].rotated_right());
        assert_eq!(rotations[3], piece.rotated_right_by(3));
        assert!(rotations.iter().all(|p| p.position() == piece.position()));
    }

    #[test]
    fn test_spawn_position_centers_shape() {
        // floor(10/2) - floor(mask_width/2)
        assert_eq!(Piece::spawn(PieceKind::I, 10).position(), PiecePosition::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::O, 10).position(), PiecePosition::new(4, 0));
        assert_eq!(Piece::spawn(PieceKind::T, 10).position(), PiecePosition::new(4, 0));
    }

    #[test]
    fn test_occupied_positions_follow_anchor() {
        let piece = Piece::new(PieceKind::T, PiecePosition::new(-1, 2));
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, vec![(0, 2), (-1, 3), (0, 3), (1, 3)]);
    }

    #[test]
    fn test_piece_serialization() {
        let piece = Piece::new(PieceKind::S, PiecePosition::new(4, 18)).rotated_right();

        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"S#1@4,18\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_serialization_negative_position() {
        let piece = Piece::new(PieceKind::I, PiecePosition::new(-3, 0)).rotated_right_by(3);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"I#3@-3,0\"");
        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_deserialization_error_cases() {
        assert!(serde_json::from_str::<Piece>("\"S1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1#4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1@4\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"X#1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"SS#1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#4@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1@abc,18\"").is_err());
    }
}
