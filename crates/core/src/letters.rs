//! Letter tables - weighted letter selection for piece cells
//!
//! Each table lists letters with their *cumulative* frequency in percent.
//! A uniform draw in `[0, 100)` picks the first letter whose cumulative value
//! is greater than or equal to the draw. Tables whose frequencies do not add
//! up to exactly 100 fall back to a fixed letter for the uncovered tail.

use rand::Rng;

/// A cumulative-frequency alphabet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterTable {
    cumulative: &'static [(char, f32)],
    fallback: char,
}

/// Russian letter frequencies.
pub const RUSSIAN: LetterTable = LetterTable {
    cumulative: &[
        ('О', 10.97),
        ('Е', 19.42),
        ('А', 27.43),
        ('И', 34.78),
        ('Н', 41.48),
        ('Т', 47.74),
        ('С', 53.21),
        ('Р', 57.94),
        ('В', 62.48),
        ('Л', 66.88),
        ('К', 70.37),
        ('М', 73.58),
        ('Д', 76.56),
        ('П', 79.37),
        ('У', 81.99),
        ('Я', 84.00),
        ('Ы', 85.90),
        ('Ь', 87.64),
        ('Г', 89.34),
        ('З', 90.99),
        ('Б', 92.58),
        ('Ч', 94.02),
        ('Й', 95.23),
        ('Х', 96.20),
        ('Ж', 97.14),
        ('Ш', 97.87),
        ('Ю', 98.51),
        ('Ц', 98.99),
        ('Щ', 99.35),
        ('Э', 99.67),
        ('Ф', 99.93),
        ('Ъ', 99.97),
        ('Ё', 100.0),
    ],
    fallback: 'О',
};

/// English letter frequencies (sums to 99.82).
pub const ENGLISH: LetterTable = LetterTable {
    cumulative: &[
        ('E', 12.70),
        ('T', 21.76),
        ('A', 29.93),
        ('O', 37.44),
        ('I', 44.41),
        ('N', 51.16),
        ('S', 57.49),
        ('H', 63.58),
        ('R', 69.57),
        ('D', 73.82),
        ('L', 77.85),
        ('C', 80.63),
        ('U', 83.39),
        ('M', 85.80),
        ('W', 88.16),
        ('F', 90.39),
        ('G', 92.41),
        ('Y', 94.38),
        ('P', 96.31),
        ('B', 97.60),
        ('V', 98.58),
        ('K', 99.35),
        ('J', 99.50),
        ('X', 99.65),
        ('Q', 99.75),
        ('Z', 99.82),
    ],
    fallback: 'E',
};

impl LetterTable {
    /// Letter selected by a draw in `[0, 100)`.
    pub fn letter_for_draw(&self, draw: f32) -> char {
        self.cumulative
            .iter()
            .find(|&&(_, cumulative)| cumulative >= draw)
            .map(|&(letter, _)| letter)
            .unwrap_or(self.fallback)
    }

    /// Draw a weighted random letter.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        let draw: f32 = rng.gen_range(0.0..100.0);
        self.letter_for_draw(draw)
    }

    pub fn fallback(&self) -> char {
        self.fallback
    }

    pub fn contains(&self, letter: char) -> bool {
        self.cumulative.iter().any(|&(l, _)| l == letter)
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}
