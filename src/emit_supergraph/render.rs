//! Small display helpers shared by the supergraph and API SDL renderers.

use std::fmt::{self, Display, Write};

use crate::subgraphs::state::Deprecated;

pub(super) const INDENT: &str = "  ";

pub(super) struct Description<'a>(pub(super) &'a str, pub(super) &'a str);

impl Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Description(description, indentation) = self;

        writeln!(f, r#"{indentation}""""#)?;

        for line in description.lines() {
            writeln!(f, "{indentation}{line}")?;
        }

        writeln!(f, r#"{indentation}""""#)
    }
}

pub(super) fn write_quoted(sdl: &mut impl Write, s: &str) -> fmt::Result {
    sdl.write_char('"')?;

    for c in s.chars() {
        match c {
            c @ ('\r' | '\n' | '\t' | '"' | '\\') => {
                sdl.write_char('\\')?;
                sdl.write_char(c)
            }
            c if c.is_control() => write!(sdl, "\\u{:04}", c as u32),
            c => sdl.write_char(c),
        }?
    }

    sdl.write_char('"')
}

pub(super) fn write_deprecated(sdl: &mut String, deprecated: &Deprecated) -> fmt::Result {
    match &deprecated.reason {
        Some(reason) => {
            sdl.push_str(" @deprecated(reason: ");
            write_quoted(sdl, reason)?;
            sdl.push(')');
            Ok(())
        }
        None => {
            sdl.push_str(" @deprecated");
            Ok(())
        }
    }
}

pub(super) fn write_string_matrix(sdl: &mut String, groups: &[Vec<String>]) -> fmt::Result {
    sdl.push('[');

    let mut groups = groups.iter().peekable();

    while let Some(group) = groups.next() {
        sdl.push('[');

        let mut items = group.iter().peekable();

        while let Some(item) = items.next() {
            write_quoted(sdl, item)?;

            if items.peek().is_some() {
                sdl.push_str(", ");
            }
        }

        sdl.push(']');

        if groups.peek().is_some() {
            sdl.push_str(", ");
        }
    }

    sdl.push(']');
    Ok(())
}

pub(super) fn write_tags(sdl: &mut String, tags: &indexmap::IndexSet<String>) -> fmt::Result {
    for tag in tags {
        sdl.push_str(" @tag(name: ");
        write_quoted(sdl, tag)?;
        sdl.push(')');
    }

    Ok(())
}

pub(super) fn write_string_list(sdl: &mut String, items: &[String]) -> fmt::Result {
    sdl.push('[');

    let mut items = items.iter().peekable();

    while let Some(item) = items.next() {
        write_quoted(sdl, item)?;

        if items.peek().is_some() {
            sdl.push_str(", ");
        }
    }

    sdl.push(']');
    Ok(())
}
