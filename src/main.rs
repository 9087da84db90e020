use std::path::Path;

use any_event::{
    init_logging, ElementRef, EventBus, EventBusConfig, Listener, Payload, TargetRef,
};
use serde_json::{json, Value};

/// Simulated widget; the bus only compares handles by identity.
#[derive(Debug)]
struct Button {
    label: String,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => EventBusConfig::load(Path::new(&path))?,
        None => EventBusConfig::default(),
    };
    tracing::info!(
        "Starting any-event {} (failure policy: {}, emit report: {})",
        any_event::VERSION,
        config.failure_policy,
        config.emit_report
    );

    let ok = ElementRef::new(Button {
        label: "OK".to_string(),
    });
    let cancel = ElementRef::new(Button {
        label: "Cancel".to_string(),
    });

    let mut bus: EventBus<Value, ElementRef<Button>> = EventBus::with_config(config);

    bus.on(
        "click",
        Listener::infallible(|payload: &Payload<Value, ElementRef<Button>>| {
            let label = payload
                .target
                .as_ref()
                .and_then(|t| t.elements().first())
                .map(|button| button.label.as_str())
                .unwrap_or("<none>");
            tracing::info!("click on {}", label);
        }),
    );
    bus.target(TargetRef::element(ok.clone())).on(
        "click",
        Listener::infallible(|_| tracing::info!("OK handler: saving")),
    );
    bus.target(TargetRef::element(cancel.clone())).on(
        "click",
        Listener::infallible(|_| tracing::info!("Cancel handler: discarding")),
    );

    for button in [&ok, &cancel] {
        let payload = Payload::new(json!({ "button": button.label }))
            .with_target(TargetRef::element(button.clone()));
        let handled = bus.emit("click", &payload)?;
        tracing::info!("'{}' click handled: {}", button.label, handled);
    }

    let handled = bus.emit("hover", &Payload::empty())?;
    tracing::info!("hover handled: {}", handled);

    bus.destroy();
    Ok(())
}
