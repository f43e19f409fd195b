#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use compound_core::{Element, Frame, Node, Props, Scheduler};

    use crate::{SWITCH_TAG, ToggleProps, context, injected};

    const ON_TEXT: &str = "The button is on";
    const OFF_TEXT: &str = "The button is off";

    type Calls = Rc<RefCell<Vec<bool>>>;

    fn listener(calls: &Calls) -> ToggleProps {
        let calls = calls.clone();
        ToggleProps::new().on_toggle(move |on| calls.borrow_mut().push(on))
    }

    fn injected_usage(calls: &Calls) -> Node {
        injected::Toggle(
            listener(calls),
            vec![
                injected::On(vec![ON_TEXT.into()]),
                injected::Off(vec![OFF_TEXT.into()]),
                injected::Button(Props::new()),
            ],
        )
    }

    fn injected_nested_usage(calls: &Calls) -> Node {
        injected::Toggle(
            listener(calls),
            vec![
                injected::On(vec![ON_TEXT.into()]),
                injected::Off(vec![OFF_TEXT.into()]),
                Element::host("div")
                    .child(injected::Button(Props::new()))
                    .into(),
            ],
        )
    }

    fn context_usage(calls: &Calls) -> Node {
        context::Toggle(
            listener(calls),
            vec![
                context::On(vec![ON_TEXT.into()]),
                context::Off(vec![OFF_TEXT.into()]),
                Element::host("div")
                    .child(context::Button(Props::new()))
                    .into(),
            ],
        )
    }

    fn shows_on(frame: &Frame) -> bool {
        let text = frame.text_content();
        assert_ne!(
            text.contains(ON_TEXT),
            text.contains(OFF_TEXT),
            "exactly one of on/off must be visible, got {text:?}"
        );
        text.contains(ON_TEXT)
    }

    fn switch_on(frame: &Frame) -> Option<bool> {
        frame.find(SWITCH_TAG)?.props.bool("on")
    }

    #[test]
    fn test_initially_off() {
        let calls = Calls::default();
        for app in [injected_usage, context_usage] {
            let mut scheduler = Scheduler::new();
            let frame = scheduler.render(|| app(&calls));
            assert!(!shows_on(&frame));
            assert_eq!(switch_on(&frame), Some(false));
            assert!(!scheduler.is_dirty());
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_single_toggle_turns_on() {
        for app in [injected_usage, context_usage] {
            let calls = Calls::default();
            let mut scheduler = Scheduler::new();
            let frame = scheduler.render(|| app(&calls));

            assert!(frame.click(SWITCH_TAG));
            assert!(scheduler.is_dirty());
            assert_eq!(*calls.borrow(), vec![true]);

            let frame = scheduler.render(|| app(&calls));
            assert!(shows_on(&frame));
            assert_eq!(switch_on(&frame), Some(true));
            assert_eq!(*calls.borrow(), vec![true]);
        }
    }

    #[test]
    fn test_rerender_without_interaction_is_stable() {
        for app in [injected_usage, context_usage] {
            let calls = Calls::default();
            let mut scheduler = Scheduler::new();
            let first = scheduler.render(|| app(&calls));
            let second = scheduler.render(|| app(&calls));

            assert_eq!(first.views, second.views);
            assert_eq!(switch_on(&first), switch_on(&second));
            assert!(!scheduler.is_dirty());
            assert!(calls.borrow().is_empty());
        }
    }

    #[test]
    fn test_latest_on_toggle_is_notified() {
        let stale = Calls::default();
        let fresh = Calls::default();
        let mut scheduler = Scheduler::new();

        scheduler.render(|| context_usage(&stale));
        let frame = scheduler.render(|| context_usage(&fresh));
        assert!(frame.click(SWITCH_TAG));

        assert!(stale.borrow().is_empty());
        assert_eq!(*fresh.borrow(), vec![true]);
    }

    fn click_switch(frame: &Frame, id: &str) {
        let switch = frame
            .find_all(SWITCH_TAG)
            .into_iter()
            .find(|v| v.props.text("id") == Some(id))
            .unwrap_or_else(|| panic!("no switch with id {id:?}"));
        assert!(switch.click());
    }

    #[test]
    fn test_sibling_root_keeps_state_when_earlier_root_mounts() {
        let app = || {
            context::Toggle(
                ToggleProps::new(),
                vec![
                    context::Button(Props::new().with("id", "a")),
                    context::On(vec![context::Toggle(
                        ToggleProps::new(),
                        vec![context::On(vec!["B on;".into()])],
                    )]),
                    context::Toggle(
                        ToggleProps::new(),
                        vec![
                            context::On(vec!["C on;".into()]),
                            context::Button(Props::new().with("id", "c")),
                        ],
                    ),
                ],
            )
        };

        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(app);
        assert_eq!(frame.text_content(), "");

        click_switch(&frame, "c");
        let frame = scheduler.render(app);
        assert_eq!(frame.text_content(), "C on;");

        click_switch(&frame, "a");
        let frame = scheduler.render(app);
        assert_eq!(frame.text_content(), "C on;");

        click_switch(&frame, "a");
        let frame = scheduler.render(app);
        assert_eq!(frame.text_content(), "C on;");
        assert!(!scheduler.is_dirty());
    }

    #[test]
    fn test_double_toggle_returns_to_off() {
        for app in [injected_usage, context_usage] {
            let calls = Calls::default();
            let mut scheduler = Scheduler::new();

            let frame = scheduler.render(|| app(&calls));
            frame.click(SWITCH_TAG);
            let frame = scheduler.render(|| app(&calls));
            frame.click(SWITCH_TAG);
            let frame = scheduler.render(|| app(&calls));

            assert!(!shows_on(&frame));
            assert_eq!(*calls.borrow(), vec![true, false]);
        }
    }

    #[test]
    fn test_double_toggle_within_one_pass() {
        let calls = Calls::default();
        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(|| context_usage(&calls));

        frame.click(SWITCH_TAG);
        frame.click(SWITCH_TAG);
        assert_eq!(*calls.borrow(), vec![true, false]);

        let frame = scheduler.render(|| context_usage(&calls));
        assert!(!shows_on(&frame));
    }

    #[test]
    fn test_context_reaches_nested_button() {
        let calls = Calls::default();
        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(|| context_usage(&calls));

        let div = frame.find("div").unwrap();
        assert!(div.find(SWITCH_TAG).is_some());

        assert!(frame.click(SWITCH_TAG));
        let frame = scheduler.render(|| context_usage(&calls));
        assert!(shows_on(&frame));
        assert_eq!(switch_on(&frame), Some(true));
    }

    #[test]
    fn test_injection_does_not_reach_nested_button() {
        let calls = Calls::default();
        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(|| injected_nested_usage(&calls));

        assert_eq!(switch_on(&frame), Some(false));
        // The nested button falls back to a no-op.
        assert!(frame.click(SWITCH_TAG));
        assert!(!scheduler.is_dirty());
        assert!(calls.borrow().is_empty());

        let frame = scheduler.render(|| injected_nested_usage(&calls));
        assert!(!shows_on(&frame));
    }

    #[test]
    fn test_button_forwards_extra_props() {
        let extra = || {
            Props::new()
                .with("class", "big-switch")
                .with("aria-label", "power")
        };
        let apps: [fn(Props) -> Node; 2] = [
            |p| injected::Toggle(ToggleProps::new(), vec![injected::Button(p)]),
            |p| context::Toggle(ToggleProps::new(), vec![context::Button(p)]),
        ];
        for app in apps {
            let mut scheduler = Scheduler::new();
            let frame = scheduler.render(|| app(extra()));
            let switch = frame.find(SWITCH_TAG).unwrap();
            assert_eq!(switch.props.text("class"), Some("big-switch"));
            assert_eq!(switch.props.text("aria-label"), Some("power"));
            assert_eq!(switch.props.bool("on"), Some(false));
            assert!(switch.props.callback("on_click").is_some());
        }
    }

    #[test]
    fn test_resolved_state_wins_over_caller_props() {
        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(|| {
            context::Toggle(
                ToggleProps::new(),
                vec![context::Button(Props::new().with("on", true))],
            )
        });
        assert_eq!(switch_on(&frame), Some(false));

        let frame = scheduler.render(|| {
            injected::Toggle(
                ToggleProps::new(),
                vec![injected::Button(Props::new().with("on", true))],
            )
        });
        assert_eq!(switch_on(&frame), Some(false));
    }

    #[test]
    fn test_slots_without_root_see_default() {
        let mut scheduler = Scheduler::new();
        let app = || {
            Node::fragment(vec![
                context::On(vec![ON_TEXT.into()]),
                context::Off(vec![OFF_TEXT.into()]),
                context::Button(Props::new()),
            ])
        };
        let frame = scheduler.render(app);
        assert!(!shows_on(&frame));
        assert_eq!(switch_on(&frame), Some(false));

        assert!(frame.click(SWITCH_TAG));
        assert!(!scheduler.is_dirty());
        assert!(!shows_on(&scheduler.render(app)));
    }

    #[test]
    fn test_inner_root_shadows_outer() {
        let mut scheduler = Scheduler::new();
        let app = || {
            context::Toggle(
                ToggleProps::new(),
                vec![
                    context::On(vec!["outer on;".into()]),
                    context::Button(Props::new().with("id", "outer")),
                    context::Toggle(
                        ToggleProps::new(),
                        vec![
                            context::On(vec!["inner on;".into()]),
                            context::Button(Props::new().with("id", "inner")),
                        ],
                    ),
                ],
            )
        };

        let frame = scheduler.render(app);
        let switches = frame.find_all(SWITCH_TAG);
        assert_eq!(switches.len(), 2);
        assert_eq!(switches[1].props.text("id"), Some("inner"));

        assert!(switches[1].click());
        let frame = scheduler.render(app);
        assert_eq!(frame.text_content(), "inner on;");

        let switches = frame.find_all(SWITCH_TAG);
        assert_eq!(switches[0].props.bool("on"), Some(false));
        assert_eq!(switches[1].props.bool("on"), Some(true));
    }

    #[test]
    fn test_injection_passes_text_children_through() {
        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(|| {
            injected::Toggle(
                ToggleProps::new(),
                vec![
                    "before;".into(),
                    Node::Empty,
                    injected::Off(vec!["off;".into()]),
                    "after".into(),
                ],
            )
        });
        assert_eq!(frame.text_content(), "before;off;after");
    }

    #[test]
    fn test_state_dropped_when_root_removed() {
        let mounted = Rc::new(RefCell::new(true));
        let calls = Calls::default();
        let app = {
            let mounted = mounted.clone();
            let calls = calls.clone();
            move || {
                if *mounted.borrow() {
                    context_usage(&calls)
                } else {
                    Node::Empty
                }
            }
        };

        let mut scheduler = Scheduler::new();
        let frame = scheduler.render(app.clone());
        frame.click(SWITCH_TAG);
        assert!(shows_on(&scheduler.render(app.clone())));

        *mounted.borrow_mut() = false;
        assert_eq!(scheduler.render(app.clone()).text_content(), "");

        *mounted.borrow_mut() = true;
        assert!(!shows_on(&scheduler.render(app)));
    }

    #[test]
    fn test_settle_after_click() {
        let calls = Calls::default();
        let mut scheduler = Scheduler::new();
        let frame = scheduler.settle(|| context_usage(&calls)).unwrap();
        frame.click(SWITCH_TAG);

        let frame = scheduler.settle(|| context_usage(&calls)).unwrap();
        assert!(shows_on(&frame));
        assert!(!scheduler.is_dirty());
    }
}
