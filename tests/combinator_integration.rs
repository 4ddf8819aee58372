//! ---
//! wk_section: "04-testing-qa"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Cross-crate composition suites for the sequential wrappers."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::time::Duration;

use wrapkit_common::ledger::TimingLedger;
use wrapkit_common::time::ManualClock;
use wrapkit_core::callable::{named, Callable, Named};
use wrapkit_core::catch::{catch, ErrorMatcher};
use wrapkit_core::decorate::decorator;
use wrapkit_core::repeat::repeat;
use wrapkit_core::timeit::TimingPolicy;

#[test]
fn timed_repeat_reports_the_whole_batch_once() {
    let clock = ManualClock::new();
    let driver = clock.clone();
    let ledger = TimingLedger::shared();
    let mut wrapper = TimingPolicy::new()
        .clock(clock)
        .handler(ledger.recorder())
        .wrap(repeat(3).wrap(named("tick", move |()| {
            driver.advance(Duration::from_millis(10));
        })));

    wrapper.call(());

    let entry = ledger.entry("tick").expect("one timed label");
    // One report per wrapper call, covering all three iterations.
    assert_eq!(entry.calls, 1);
    assert_eq!(entry.total, Duration::from_millis(30));
}

#[test]
fn label_survives_three_layers_of_wrapping() {
    let wrapper = TimingPolicy::new().wrap(repeat(2).wrap(named("probe", |()| ())));
    assert_eq!(Callable::<()>::label(&wrapper), "probe");
}

#[test]
fn catch_absorbs_only_matched_errors_in_a_pipeline() {
    fn parse_port(raw: &str) -> anyhow::Result<u16> {
        let port: u16 = raw.parse()?;
        if port < 1024 {
            anyhow::bail!("privileged port {port}");
        }
        Ok(port)
    }

    let mut guarded = catch(ErrorMatcher::of::<std::num::ParseIntError>())
        .silent(true)
        .wrap(named("parse_port", parse_port));

    assert_eq!(guarded.call("8080").unwrap(), Some(8080));
    // Unparseable input matches the typed matcher and is swallowed.
    assert_eq!(guarded.call("eight").unwrap(), None);
    // The ad-hoc privileged-port error does not match and propagates.
    assert!(guarded.call("80").is_err());
}

#[test]
fn handler_counts_match_repeated_failures() {
    let mut absorbed = Vec::new();
    {
        let mut wrapper = repeat(3).wrap(
            catch(ErrorMatcher::Any).wrap_with(
                named("always_fails", |()| -> anyhow::Result<u32> {
                    anyhow::bail!("nope")
                }),
                |err: anyhow::Error| {
                    absorbed.push(err.to_string());
                    None
                },
            ),
        );
        // Three iterations, each absorbed independently by the handler.
        assert_eq!(wrapper.call(()).unwrap().unwrap(), None);
    }
    assert_eq!(absorbed, vec!["nope", "nope", "nope"]);
}

#[test]
fn decorator_factory_composes_with_timing() {
    fn double(x: i32) -> i32 {
        x * 2
    }

    let ledger = TimingLedger::shared();
    let factory = decorator(
        2i32,
        |callee: &mut Named<fn(i32) -> i32>, x: i32, scale: &i32| callee.call(x) * scale,
    );
    let mut timed = TimingPolicy::new()
        .handler(ledger.recorder())
        .wrap(factory.apply_with(10, named("scale", double as fn(i32) -> i32)));

    assert_eq!(timed.call(2), 40);
    assert_eq!(Callable::<i32>::label(&timed), "scale");
    assert_eq!(ledger.entry("scale").unwrap().calls, 1);
}
