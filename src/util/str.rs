pub(crate) trait StringExt {
    fn trim_in_place(&mut self);

    /// Appends `text`, collapsing every run of whitespace into a single space.
    ///
    /// Leading whitespace is dropped while the buffer is empty
    /// or already ends with whitespace.
    fn push_collapsed(&mut self, text: &str);
}

impl StringExt for String {
    fn trim_in_place(&mut self) {
        self.truncate(self.trim_end().len());

        let start = self.len() - self.trim_start().len();
        if start > 0 {
            self.drain(..start);
        }
    }

    fn push_collapsed(&mut self, text: &str) {
        let mut pending_space = false;

        for c in text.chars() {
            if c.is_whitespace() {
                pending_space = true;
                continue;
            }
            if pending_space && !self.is_empty() && !self.ends_with(char::is_whitespace) {
                self.push(' ');
            }
            pending_space = false;
            self.push(c);
        }
        if pending_space && !self.is_empty() && !self.ends_with(char::is_whitespace) {
            self.push(' ');
        }
    }
}

/// Splits a whitespace-separated property list (`properties`, `epub:type`, etc.).
pub(crate) fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_ascii_whitespace()
}
