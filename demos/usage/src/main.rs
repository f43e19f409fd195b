use compound_core::{Element, Frame, Node, Props, Scheduler};
use compound_ui::{SWITCH_TAG, ToggleProps, context, injected};

fn on_toggle() -> ToggleProps {
    ToggleProps::new().on_toggle(|on| log::info!("onToggle {on}"))
}

/// Slots as direct children of the root.
fn compound_components() -> Node {
    injected::Toggle(
        on_toggle(),
        vec![
            injected::On(vec!["The button is on".into()]),
            injected::Off(vec!["The button is off".into()]),
            injected::Button(Props::new()),
        ],
    )
}

/// Button wrapped in a container, which only the context variant reaches.
fn flexible_compound_components() -> Node {
    context::Toggle(
        on_toggle(),
        vec![
            context::On(vec!["The button is on".into()]),
            context::Off(vec!["The button is off".into()]),
            Element::host("div")
                .child(context::Button(Props::new()))
                .into(),
        ],
    )
}

fn describe(frame: &Frame) -> String {
    let on = frame
        .find(SWITCH_TAG)
        .and_then(|s| s.props.bool("on"))
        .unwrap_or(false);
    format!("{:<20} switch={}", frame.text_content(), if on { "on" } else { "off" })
}

fn drive(title: &str, app: fn() -> Node, clicks: usize) -> anyhow::Result<()> {
    println!("== {title}");
    let mut scheduler = Scheduler::new();
    let mut frame = scheduler.settle(app)?;
    println!("  initial  {}", describe(&frame));
    for i in 1..=clicks {
        if !frame.click(SWITCH_TAG) {
            anyhow::bail!("no {SWITCH_TAG} rendered");
        }
        frame = scheduler.settle(app)?;
        println!("  click {i}  {}", describe(&frame));
    }
    scheduler.unmount();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    drive("Compound Components", compound_components, 2)?;
    drive("Flexible Compound Components", flexible_compound_components, 2)?;
    Ok(())
}
