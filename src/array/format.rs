use std::fmt::{self, Debug, Write};

/// Writes `begin`, every item through its `Debug` rendering separated by
/// `sep`, then `end`. Strings come out quoted and escaped, booleans as
/// `true` / `false`.
pub(crate) fn write_joined<W, I>(out: &mut W, items: I, sep: &str, begin: &str, end: &str) -> fmt::Result
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Debug,
{
    out.write_str(begin)?;
    for (i, item) in items.into_iter().enumerate() {
        if i != 0 {
            out.write_str(sep)?;
        }
        write!(out, "{:?}", item)?;
    }
    out.write_str(end)
}

pub(crate) fn joined<I>(items: I, sep: &str, begin: &str, end: &str) -> String
where
    I: IntoIterator,
    I::Item: Debug,
{
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_joined(&mut s, items, sep, begin, end);
    s
}
