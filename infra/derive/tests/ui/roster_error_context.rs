use roster_derive::roster_error;
use std::borrow::Cow;

#[roster_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("missing"))
}

fn load() -> Result<(), DemoError> {
    read().context("Reading manifest")?;
    Ok(())
}

fn main() {
    let err = load().expect_err("read fails");
    assert_eq!(err.to_string(), "IO error (Reading manifest): missing");

    let relabeled: Result<(), DemoError> = Err(DemoError::from("boom"));
    let err = relabeled.context("Second pass").expect_err("still an error");
    assert_eq!(err.to_string(), "Internal error (Second pass): boom");
}
