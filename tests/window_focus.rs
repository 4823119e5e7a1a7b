use std::cell::RefCell;
use std::rc::Rc;

use sipflow_tui::{
    configure, Button, Container, HeadlessScreen, InputEvent, InputVerdict, Key, KeyAction, Label,
    Pane, Point, Screen, Widget, Window, WindowHooks,
};

fn button_at(text: &str, row: u16, col: u16) -> Box<dyn Widget> {
    let mut button = Button::new(text);
    button.set_position(row, col);
    Box::new(button)
}

fn counting_button_at(text: &str, row: u16, col: u16) -> (Box<dyn Widget>, Rc<RefCell<u32>>) {
    let fired = Rc::new(RefCell::new(0));
    let mut button = Button::new(text);
    button.set_position(row, col);
    let counter = Rc::clone(&fired);
    button.set_on_activate(Some(Box::new(move || {
        *counter.borrow_mut() += 1;
    })));
    (Box::new(button), fired)
}

#[test]
fn attaching_a_mixed_subtree_builds_a_pre_order_chain() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);

    let mut pane = Pane::new(3, 30);
    pane.attach(Box::new(Label::new("Protocol:")));
    pane.attach(button_at("Udp", 1, 0));
    pane.attach(button_at("Tcp", 1, 10));
    let pane_id = window.attach(Box::new(pane));
    window.attach(Box::new(Label::new("F1 for help")));
    let ok_id = window.attach(button_at("Ok", 10, 0));

    // Two labels and the pane are not focusable; the chain holds the three
    // buttons in tree pre-order.
    let pane_widget = window.widget(pane_id).expect("pane attached");
    let container = pane_widget.as_container().expect("pane is a container");
    let udp_id = container.children()[1].id();
    let tcp_id = container.children()[2].id();
    assert_eq!(window.focus_chain(), &[udp_id, tcp_id, ok_id]);
}

#[test]
fn focus_cycles_forward_and_wraps_backwards() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let a = window.attach(button_at("A", 0, 0));
    let b = window.attach(button_at("B", 1, 0));
    let c = window.attach(button_at("C", 2, 0));
    window.set_focus(a);

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert_eq!(window.handle_key(Key::Tab), InputVerdict::Handled);
        seen.push(window.focused());
    }
    assert_eq!(seen, vec![b, c, a]);

    assert_eq!(window.handle_key(Key::BackTab), InputVerdict::Handled);
    assert_eq!(window.focused(), c);
}

#[test]
fn hidden_widgets_are_skipped_and_navigation_wraps_around_them() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let a = window.attach(button_at("A", 0, 0));
    let b = window.attach(button_at("B", 1, 0));
    let c = window.attach(button_at("C", 2, 0));
    window.set_focus(a);
    window.widget_mut(b).expect("b attached").hide();

    window.handle_key(Key::Tab);
    assert_eq!(window.focused(), c);
    window.handle_key(Key::Tab);
    assert_eq!(window.focused(), a);
}

#[test]
fn fully_hidden_chains_leave_focus_unchanged() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let a = window.attach(button_at("A", 0, 0));
    let b = window.attach(button_at("B", 1, 0));
    window.set_focus(a);
    window.widget_mut(a).expect("a attached").hide();
    window.widget_mut(b).expect("b attached").hide();

    assert_eq!(window.handle_key(Key::Tab), InputVerdict::Handled);
    assert_eq!(window.focused(), a);
    assert_eq!(window.handle_key(Key::BackTab), InputVerdict::Handled);
    assert_eq!(window.focused(), a);
}

#[test]
fn oversized_windows_keep_a_non_negative_origin() {
    let mut screen = HeadlessScreen::new(24, 80);
    let window = Window::new(&mut screen, 30, 100);
    assert_eq!(window.position(), Point::new(10, 3));
}

#[test]
fn scripted_mouse_reports_route_focus_and_clicks() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let (ok, fired) = counting_button_at("Ok", 5, 10);
    let ok_id = window.attach(ok);

    // Press inside the button, wheel over it, then release. SGR reports are
    // 1-based; the button spans cols 10..16 on row 5.
    screen.push_input("\x1b[<0;11;6M\x1b[<64;11;6M\x1b[<0;11;6m");
    let mut verdicts = Vec::new();
    for event in screen.read_input() {
        match event {
            InputEvent::Mouse(mouse) => verdicts.push(window.handle_mouse(mouse)),
            InputEvent::Key(key) => {
                window.handle_key(key);
            }
            _ => {}
        }
    }

    assert_eq!(window.focused(), ok_id);
    assert_eq!(*fired.borrow(), 1);
    assert_eq!(
        verdicts,
        vec![
            InputVerdict::Handled,
            InputVerdict::Unhandled,
            InputVerdict::Unhandled
        ]
    );
}

#[test]
fn titles_center_by_display_width_in_screen_snapshots() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 5, 20);
    window.set_title("統計");

    // The 5x20 window lands at row 9, col 30; the double-width title takes
    // four cells and centers at col 8 within the window.
    let expected = format!("{}統計{}", " ".repeat(38), " ".repeat(38));
    assert_eq!(screen.snapshot_row(9), expected);
}

#[test]
fn floating_widgets_map_above_later_siblings() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);

    let mut popup = Pane::new(1, 5);
    popup.base_mut().set_floating(true);
    window.attach(Box::new(popup));
    window.attach(Box::new(Label::new("below!")));

    window.draw();
    let row = screen.snapshot_row(0);
    assert!(
        row.starts_with("     !"),
        "floating pane must cover the label: {row:?}"
    );
}

#[test]
fn resize_events_reach_the_window_hook() {
    struct ResizeProbe {
        seen: Rc<RefCell<Vec<(u16, u16)>>>,
    }

    impl WindowHooks for ResizeProbe {
        fn resize(&mut self, _window: &mut Window, screen: &mut dyn Screen) {
            self.seen.borrow_mut().push((screen.rows(), screen.cols()));
        }
    }

    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let seen = Rc::new(RefCell::new(Vec::new()));
    window.set_hooks(Box::new(ResizeProbe {
        seen: Rc::clone(&seen),
    }));

    screen.resize_to(30, 100);
    for event in screen.read_input() {
        if let InputEvent::Resize { .. } = event {
            window.resize(&mut screen);
        }
    }
    assert_eq!(seen.borrow().as_slice(), [(30, 100)]);
}

#[test]
fn finalized_windows_disappear_from_the_screen() {
    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 5, 20);
    window.set_title("Save");
    assert!(screen.snapshot_row(9).contains("Save"));

    window.finalize(&mut screen);
    assert_eq!(screen.snapshot_row(9), " ".repeat(80));
}

#[test]
fn rebound_keys_drive_field_navigation() {
    configure(|bindings| {
        bindings.bind(Key::Char('n'), KeyAction::NextField);
    });

    let mut screen = HeadlessScreen::new(24, 80);
    let mut window = Window::new(&mut screen, 24, 80);
    let a = window.attach(button_at("A", 0, 0));
    let b = window.attach(button_at("B", 1, 0));
    window.set_focus(a);

    assert_eq!(window.handle_key(Key::Char('n')), InputVerdict::Handled);
    assert_eq!(window.focused(), b);
}
