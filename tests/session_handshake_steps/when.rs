//! When steps for session handshake BDD scenarios.

use super::world::{SessionWorld, run_async};
use chrono::TimeDelta;
use cohort::session::services::HandshakeRequest;
use rstest_bdd_macros::when;

#[when(r#""{owner}" completes the handshake with token "{token}" on device "{device}""#)]
fn complete_handshake(world: &mut SessionWorld, owner: String, token: String, device: String) {
    let service = world.service();
    let result = run_async(service.handshake(HandshakeRequest::new(token, owner, device)));
    world.last_handshake = Some(result);
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut SessionWorld, days: i64) {
    world.clock.advance(TimeDelta::days(days));
}

#[when(r#"the client presents owner "{owner}" and device "{device}""#)]
fn client_presents(world: &mut SessionWorld, owner: String, device: String) {
    let service = world.service();
    let result = run_async(service.revalidate(Some(&owner), Some(&device)));
    world.last_revalidation = Some(result);
}
