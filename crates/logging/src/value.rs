//! crates/logging/src/value.rs
//! Conversion of loggable values into text fragments.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Marker that moves the in-progress line into the total buffer without a
/// newline.
///
/// Writing `Flush` lets one logical line be assembled from several
/// separated writes while the buffers stay inspectable after each step.
///
/// ```
/// use linelog::{Flush, Logger};
///
/// let logger = Logger::for_tests();
/// logger.log("Str1").log(Flush);
/// assert_eq!(logger.line_buffer(), "");
/// assert_eq!(logger.total_buffer(), "Str1");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flush;

/// What a [`LogValue`] contributes to the logger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fragment<'a> {
    /// Text to split on newlines and buffer.
    Text(Cow<'a, str>),
    /// The [`Flush`] marker.
    Flush,
}

/// Values accepted by [`Logger::log`](crate::Logger::log).
pub trait LogValue {
    /// Renders the value.
    fn to_fragment(&self) -> Fragment<'_>;
}

impl<T> LogValue for &T
where
    T: LogValue + ?Sized,
{
    fn to_fragment(&self) -> Fragment<'_> {
        (**self).to_fragment()
    }
}

impl LogValue for str {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(Cow::Borrowed(self))
    }
}

impl LogValue for String {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(Cow::Borrowed(self))
    }
}

impl LogValue for Cow<'_, str> {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(Cow::Borrowed(self))
    }
}

impl LogValue for char {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(Cow::Owned(self.to_string()))
    }
}

impl LogValue for bool {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(Cow::Borrowed(if *self { "true" } else { "false" }))
    }
}

impl LogValue for Path {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Text(self.to_string_lossy())
    }
}

impl LogValue for PathBuf {
    fn to_fragment(&self) -> Fragment<'_> {
        self.as_path().to_fragment()
    }
}

impl LogValue for fmt::Arguments<'_> {
    fn to_fragment(&self) -> Fragment<'_> {
        match self.as_str() {
            Some(text) => Fragment::Text(Cow::Borrowed(text)),
            None => Fragment::Text(Cow::Owned(self.to_string())),
        }
    }
}

impl LogValue for Flush {
    fn to_fragment(&self) -> Fragment<'_> {
        Fragment::Flush
    }
}

macro_rules! display_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LogValue for $ty {
                fn to_fragment(&self) -> Fragment<'_> {
                    Fragment::Text(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

display_values!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(value: &dyn LogValue) -> String {
        match value.to_fragment() {
            Fragment::Text(text) => text.into_owned(),
            Fragment::Flush => panic!("expected text fragment"),
        }
    }

    #[test]
    fn primitives_render_as_display() {
        assert_eq!(text_of(&42_i32), "42");
        assert_eq!(text_of(&-7_isize), "-7");
        assert_eq!(text_of(&usize::MAX), usize::MAX.to_string());
        assert_eq!(text_of(&1.5_f64), "1.5");
        assert_eq!(text_of(&'x'), "x");
    }

    #[test]
    fn booleans_render_as_words() {
        assert_eq!(text_of(&true), "true");
        assert_eq!(text_of(&false), "false");
    }

    #[test]
    fn paths_render_lossily() {
        let path = PathBuf::from("dir").join("file.txt");
        assert_eq!(text_of(&path), path.to_string_lossy());
    }

    #[test]
    fn strings_are_borrowed() {
        let owned = String::from("borrowed");
        assert!(matches!(
            owned.to_fragment(),
            Fragment::Text(Cow::Borrowed("borrowed"))
        ));
    }

    #[test]
    fn flush_marker_is_distinguished() {
        assert_eq!(Flush.to_fragment(), Fragment::Flush);
        assert_eq!((&Flush).to_fragment(), Fragment::Flush);
    }

    #[test]
    fn format_arguments_render() {
        assert_eq!(text_of(&format_args!("{}-{}", 1, 2)), "1-2");
    }
}
