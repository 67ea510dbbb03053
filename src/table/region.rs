/// Rectangular block of merged cells, excluded from cell iteration.
///
/// Coordinates are 1-based and inclusive; row 1 is the header row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergeRegion {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl MergeRegion {
    pub const fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        MergeRegion {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Checks if the 1-based cell (`row`, `col`) lies inside this region.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row) && (self.start_col..=self.end_col).contains(&col)
    }
}
