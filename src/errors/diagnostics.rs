use std::slice::Iter;

use log::debug;

use super::errors::Error;

/// Errors recorded during one parse, in the order they were found.
///
/// Append-only while the parser runs; the caller reads it once the parse
/// is over. A non-empty collector means the program is syntactically
/// invalid.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: Vec::new() }
    }

    pub fn push(&mut self, error: Error) {
        debug!("recorded diagnostic: {}", error);
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    /// The human-readable message of every error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(Error::message).collect()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl IntoIterator for Diagnostics {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
