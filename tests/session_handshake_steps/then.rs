//! Then steps for session handshake BDD scenarios.

use super::world::{SessionWorld, run_async};
use cohort::session::{
    domain::OwnerId, ports::SessionStore, services::SessionServiceError,
};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

#[then("the handshake succeeds")]
fn handshake_succeeds(world: &SessionWorld) -> Result<(), eyre::Report> {
    match world.last_handshake.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre!("expected a successful handshake, got {other:?}")),
    }
}

#[then("the handshake fails with a subject mismatch")]
fn handshake_fails_with_mismatch(world: &SessionWorld) -> Result<(), eyre::Report> {
    match world.last_handshake.as_ref() {
        Some(Err(SessionServiceError::SubjectMismatch)) => Ok(()),
        other => Err(eyre!("expected SubjectMismatch, got {other:?}")),
    }
}

#[then(r#"a session is stored for "{owner}" on device "{device}""#)]
fn session_is_stored(world: &SessionWorld, owner: String, device: String) -> Result<(), eyre::Report> {
    let owner_id = OwnerId::new(owner).wrap_err("owner id in scenario")?;
    let record = run_async(world.store.find(&owner_id))
        .wrap_err("look up session record")?
        .ok_or_else(|| eyre!("no session stored for {owner_id}"))?;
    if record.fingerprint().as_str() != device {
        return Err(eyre!(
            "expected device {device}, found {}",
            record.fingerprint().as_str()
        ));
    }
    Ok(())
}

#[then(r#"no session is stored for "{owner}""#)]
fn no_session_is_stored(world: &SessionWorld, owner: String) -> Result<(), eyre::Report> {
    let owner_id = OwnerId::new(owner).wrap_err("owner id in scenario")?;
    let record = run_async(world.store.find(&owner_id)).wrap_err("look up session record")?;
    if let Some(found) = record {
        return Err(eyre!("unexpected session record {found:?}"));
    }
    Ok(())
}

#[then("the session is accepted")]
fn session_is_accepted(world: &SessionWorld) -> Result<(), eyre::Report> {
    match world.last_revalidation.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre!("expected an accepted session, got {other:?}")),
    }
}

#[then("the session is expired")]
fn session_is_expired(world: &SessionWorld) -> Result<(), eyre::Report> {
    match world.last_revalidation.as_ref() {
        Some(Err(SessionServiceError::SessionExpired)) => Ok(()),
        other => Err(eyre!("expected SessionExpired, got {other:?}")),
    }
}
