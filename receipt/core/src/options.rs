/**
    Limits applied while decoding a receipt.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /**
        Deepest nested attribute set [`crate::Receipt::nested`] will open.
        The top-level payload is depth 0 and an in-app purchase record inside
        it is depth 1.
    */
    pub max_depth: usize,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 8;

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
