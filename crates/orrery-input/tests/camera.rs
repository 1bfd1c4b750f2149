use glam::Vec2;
use orrery_config::Config;
use orrery_input::{CameraController, InputQueue, WinitBridge};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

#[test]
fn bridged_drag_scroll_and_toggle() {
    let config = Config::default();
    let mut camera = CameraController::from_config(&config.camera, config.scene.tilt_enabled);
    let mut bridge = WinitBridge::new();
    let mut queue = InputQueue::new();

    // Pointer wanders before the drag starts; the drag must not jump.
    bridge.on_cursor_moved(400.0, 300.0, &mut queue);
    bridge.on_button(MouseButton::Left, ElementState::Pressed, &mut queue);
    bridge.on_cursor_moved(420.0, 290.0, &mut queue);
    bridge.on_button(MouseButton::Left, ElementState::Released, &mut queue);
    bridge.on_cursor_moved(10.0, 10.0, &mut queue);
    bridge.on_scroll(MouseScrollDelta::LineDelta(0.0, 3.0), &mut queue);
    let t = PhysicalKey::Code(KeyCode::KeyT);
    bridge.on_key(t, ElementState::Pressed, false, &mut queue);

    for event in queue.drain() {
        camera.handle_event(&event);
    }

    let state = camera.state();
    assert!((state.yaw_deg - 10.0).abs() < 1e-5);
    assert!((state.pitch_deg - 15.0).abs() < 1e-5);
    assert_eq!(state.zoom_distance, -27.0);
    assert!(!state.is_dragging);
    assert_eq!(state.last_pointer_pos, Vec2::new(10.0, 10.0));
    assert!(!camera.tilt_enabled());
}
