//! Helper for the field-dump `Display` impls on request objects.

use std::fmt::{self, Display, Formatter};

/// Writes `{Name: value,Other: value}`, keeping only populated fields,
/// in declaration order. Binary payloads render hex-encoded.
pub(crate) struct FieldWriter<'a, 'f> {
    f: &'a mut Formatter<'f>,
    first: bool,
}

impl<'a, 'f> FieldWriter<'a, 'f> {
    pub(crate) fn new(f: &'a mut Formatter<'f>) -> Result<Self, fmt::Error> {
        write!(f, "{{")?;
        Ok(Self { f, first: true })
    }

    pub(crate) fn field(&mut self, name: &str, value: &dyn Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{name}: {value}")
    }

    pub(crate) fn opt<T: Display>(&mut self, name: &str, value: Option<&T>) -> fmt::Result {
        match value {
            Some(v) => self.field(name, v),
            None => Ok(()),
        }
    }

    pub(crate) fn bytes(&mut self, name: &str, value: &[u8]) -> fmt::Result {
        self.field(name, &hex::encode(value))
    }

    pub(crate) fn opt_bytes(&mut self, name: &str, value: Option<&Vec<u8>>) -> fmt::Result {
        match value {
            Some(v) => self.bytes(name, v),
            None => Ok(()),
        }
    }

    /// Empty lists are treated as absent.
    pub(crate) fn list<T: Display>(&mut self, name: &str, values: &[T]) -> fmt::Result {
        if values.is_empty() {
            return Ok(());
        }
        self.separator()?;
        write!(self.f, "{name}: [")?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                write!(self.f, ", ")?;
            }
            write!(self.f, "{v}")?;
        }
        write!(self.f, "]")
    }

    pub(crate) fn finish(self) -> fmt::Result {
        write!(self.f, "}}")
    }

    fn separator(&mut self) -> fmt::Result {
        if self.first {
            self.first = false;
            Ok(())
        } else {
            write!(self.f, ",")
        }
    }
}
