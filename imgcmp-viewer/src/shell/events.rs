//! Winit event handling.
//!
//! Translates WindowEvent into view and input changes. Key bindings live in
//! `crate::keyboard`.

use imgcmp_core::Response;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;

use super::app::ViewerApp;
use crate::keyboard::command_for_key;

pub fn handle_window_event(app: &mut ViewerApp, event_loop: &ActiveEventLoop, event: WindowEvent) {
    let response = match event {
        // ── Window lifecycle ──
        WindowEvent::CloseRequested => {
            tracing::info!("window close requested");
            Response::Quit
        }

        WindowEvent::Resized(new_size) => {
            if let Some(backend) = &mut app.backend {
                backend.resize(new_size);
            }
            Response::Redraw
        }

        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            app.view.set_device_pixel_scale(scale_factor as f32);
            Response::Redraw
        }

        WindowEvent::RedrawRequested => {
            if let Err(e) = app.redraw() {
                app.fail(event_loop, e.context("frame failed"));
            }
            Response::Ignore
        }

        // ── Keyboard ──
        WindowEvent::KeyboardInput { event, .. } => {
            if event.state != ElementState::Pressed {
                return;
            }
            match command_for_key(&event.logical_key, event.repeat) {
                Some(command) => app.input.apply(&mut app.view, command),
                None => Response::Ignore,
            }
        }

        // ── Pointer ──
        WindowEvent::CursorMoved { position, .. } => {
            let scale = app.window.as_ref().map_or(1.0, |w| w.scale_factor());
            let logical = position.to_logical::<f32>(scale);
            app.input.cursor_moved(&mut app.view, logical.x, logical.y)
        }

        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => {
            match state {
                ElementState::Pressed => {
                    let at = app.input.pointer_pressed();
                    app.probe(at);
                }
                ElementState::Released => app.input.pointer_released(),
            }
            Response::Ignore
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => y,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
            };
            app.input.scrolled(&mut app.view, dy)
        }

        _ => Response::Ignore,
    };

    match response {
        Response::Redraw => app.request_redraw(),
        Response::Quit => event_loop.exit(),
        Response::Ignore => {}
    }
}
