//! BDD step definitions for thread continuity feature

use std::time::Duration;

use cucumber::{given, then, when};

use pg_alerter::thread::should_start_new_thread;

use crate::world::{now, thread_started_minutes_ago, AlerterWorld};

#[given("there is no previous thread")]
fn no_previous_thread(world: &mut AlerterWorld) {
    world.last_thread_id = Some(String::new());
}

#[given(expr = "the previous thread id is {string}")]
fn previous_thread_id(world: &mut AlerterWorld, thread_id: String) {
    world.last_thread_id = Some(thread_id);
}

#[given(expr = "the previous thread was started {int} minutes ago")]
fn previous_thread_age(world: &mut AlerterWorld, minutes: u64) {
    world.last_thread_id = Some(thread_started_minutes_ago(minutes));
}

#[when(expr = "the thread policy is checked with a minimum interval of {int} minutes")]
fn check_policy(world: &mut AlerterWorld, minutes: u64) {
    let last_thread_id = world
        .last_thread_id
        .as_deref()
        .expect("previous thread not set");
    world.new_thread_decision = Some(should_start_new_thread(
        last_thread_id,
        now(),
        Duration::from_secs(minutes * 60),
    ));
}

#[then("a new thread should be started")]
fn new_thread(world: &mut AlerterWorld) {
    assert_eq!(world.new_thread_decision, Some(true));
}

#[then("the existing thread should be reused")]
fn reuse_thread(world: &mut AlerterWorld) {
    assert_eq!(world.new_thread_decision, Some(false));
}
