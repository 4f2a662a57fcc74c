//! BDD steps for the session lifecycle over the in-memory backends.

use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use palaver::session::{
    adapters::memory::{InMemoryIdentityGateway, InMemoryProfileStore},
    error::{AuthError, GatewayError},
    services::SessionManager,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type MemoryManager = SessionManager<InMemoryIdentityGateway, InMemoryProfileStore, DefaultClock>;

struct SessionWorld {
    manager: MemoryManager,
    last_error: Option<AuthError>,
}

impl Default for SessionWorld {
    fn default() -> Self {
        Self {
            manager: SessionManager::new(
                Arc::new(InMemoryIdentityGateway::new()),
                Arc::new(InMemoryProfileStore::new()),
                Arc::new(DefaultClock),
            ),
            last_error: None,
        }
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::default()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

#[given("a fresh chat client")]
fn fresh_chat_client(world: &mut SessionWorld) {
    *world = SessionWorld::default();
}

#[given("a registered user who signed out")]
fn registered_user_who_signed_out(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    *world = SessionWorld::default();
    run_async(world.manager.register("a@x.com", "secret1", "alice"))
        .map_err(|err| eyre!("registration failed: {err}"))?;
    run_async(world.manager.logout()).map_err(|err| eyre!("logout failed: {err}"))?;
    Ok(())
}

#[when("a user registers as alice")]
fn a_user_registers_as_alice(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    run_async(world.manager.register("a@x.com", "secret1", "alice"))
        .map(|_| ())
        .map_err(|err| eyre!("registration failed: {err}"))
}

#[when("they log in with the wrong password")]
fn they_log_in_with_the_wrong_password(world: &mut SessionWorld) {
    world.last_error = run_async(world.manager.login("a@x.com", "wrong-password")).err();
}

#[then("the session shows alice as signed in")]
fn the_session_shows_alice_as_signed_in(world: &SessionWorld) -> Result<(), eyre::Report> {
    let user = world
        .manager
        .current_user()
        .ok_or_else(|| eyre!("nobody is signed in"))?;
    if user.display_name() == "alice" {
        Ok(())
    } else {
        Err(eyre!("unexpected display name: {}", user.display_name()))
    }
}

#[then("the session stays signed out")]
fn the_session_stays_signed_out(world: &SessionWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(AuthError::Gateway(GatewayError::InvalidCredentials)) => {
            if world.manager.current_user().is_none() {
                Ok(())
            } else {
                Err(eyre!("a user is still signed in"))
            }
        }
        other => Err(eyre!("expected invalid credentials, got {other:?}")),
    }
}

#[scenario(
    path = "tests/features/session_lifecycle.feature",
    name = "Registration signs the user in"
)]
#[tokio::test(flavor = "multi_thread")]
async fn registration_signs_the_user_in(world: SessionWorld) {
    // World parameter required for rstest-bdd fixture injection; step
    // definitions handle mutation.
    let _ = world;
}

#[scenario(
    path = "tests/features/session_lifecycle.feature",
    name = "A wrong password is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected(world: SessionWorld) {
    // World parameter required for rstest-bdd fixture injection; step
    // definitions handle mutation.
    let _ = world;
}
