use super::*;

impl Scanner<'_> {
    /// Advances past the current character and on to the next `[`, or to
    /// end of input. Always makes progress.
    pub(super) fn skip_to_next_bracket(&mut self) {
        let rest = self.remaining();
        let mut chars = rest.char_indices();
        chars.next();
        for (i, c) in chars {
            if c == '[' {
                self.advance(i);
                return;
            }
        }
        self.advance(rest.len());
    }
}
