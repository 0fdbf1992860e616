//! Given steps for session handshake BDD scenarios.

use super::world::{SessionWorld, run_async};
use cohort::session::{domain::VerifiedIdentity, services::HandshakeRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the identity provider accepts token "{token}" for subject "{subject}""#)]
fn provider_accepts_token(world: &mut SessionWorld, token: String, subject: String) {
    world
        .tokens
        .push((token, VerifiedIdentity::new(subject, None, None)));
}

#[given(r#""{owner}" has signed in with token "{token}" on device "{device}""#)]
fn owner_has_signed_in(
    world: &mut SessionWorld,
    owner: String,
    token: String,
    device: String,
) -> Result<(), eyre::Report> {
    let service = world.service();
    run_async(service.handshake(HandshakeRequest::new(token, owner, device)))
        .wrap_err("handshake in scenario setup")?;
    Ok(())
}
