use actix_session::Session;

/// Queue a one-shot message for the next rendered page.
pub fn set_flash(session: &Session, message: impl Into<String>) {
    let _ = session.insert("flash", message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
