// src/main.rs
use nannou::prelude::*;
use std::time::Instant;

use quadmark::{
    animation::{Pivot, PlaybackClock, PlaybackState, Timeline},
    config::*,
    views::{logo_palette, Quad},
};

struct Model {
    // Core components:
    quads: [Quad; 4],
    colors: [Rgba; 4],
    timeline: Timeline,

    // Playback:
    clock: PlaybackClock,
    playback: PlaybackState,

    // Rendering components:
    texture: wgpu::Texture,
    draw: nannou::Draw,
    draw_renderer: nannou::draw::Renderer,
    texture_reshaper: wgpu::TextureReshaper,

    // Style
    background: Rgb,

    // FPS
    last_update: Instant,
    fps: f32,

    debug_flag: bool,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Create window
    let window_id = app
        .new_window()
        .title("quadmark 0.1.0")
        .size(config.window.width, config.window.height)
        .msaa_samples(1)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();
    let window = app.window(window_id).unwrap();

    // Set up render texture
    let device = window.device();
    let draw = nannou::Draw::new();
    let texture = wgpu::TextureBuilder::new()
        .size([
            config.rendering.texture_width,
            config.rendering.texture_height,
        ])
        // Render target for the `Draw` pass, sampled by the reshaper below.
        .usage(wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING)
        .sample_count(config.rendering.texture_samples)
        .format(wgpu::TextureFormat::Rgba16Float)
        .build(device);

    // Set up rendering pipeline
    let draw_renderer = nannou::draw::RendererBuilder::new()
        .build_from_texture_descriptor(device, texture.descriptor());
    let sample_count = window.msaa_samples();

    // Create the texture reshaper.
    let texture_view = texture.view().build();
    let texture_sample_count = texture.sample_count();
    let texture_sample_type = texture.sample_type();
    let dst_format = Frame::TEXTURE_FORMAT;
    let texture_reshaper = wgpu::TextureReshaper::new(
        device,
        &texture_view,
        texture_sample_count,
        texture_sample_type,
        sample_count,
        dst_format,
    );

    // Four identical squares; the phase table drives everything else
    let box_size = config.style.box_size;
    let quads: [Quad; 4] = std::array::from_fn(|_| Quad::new(box_size, box_size));
    let timeline = Timeline::logo_sequence(config.style.quadrant_offset());

    let mut playback = PlaybackState::default();
    if config.playback.start_paused {
        playback.pause();
    }

    let [red, green, blue] = config.style.background;

    Model {
        quads,
        colors: logo_palette(),
        timeline,

        clock: PlaybackClock::new(),
        playback,

        texture,
        draw,
        draw_renderer,
        texture_reshaper,

        background: rgb(red, green, blue),

        last_update: Instant::now(),
        fps: 0.0,

        debug_flag: false,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // toggle play/pause (the held-key commands live in process_input)
        Key::T => model.playback.toggle(),
        Key::P => model.debug_flag = !model.debug_flag,
        _ => (),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    // FPS calculation
    if model.debug_flag {
        model.fps = 1.0 / duration.as_secs_f32();
    }

    // Poll the level-detected controls once per frame
    process_input(app, model);

    model.draw.reset();
    model.draw.background().color(model.background);

    if model.playback.is_paused() {
        // Hold the clock in place and redraw the last computed transforms
        model.clock.hold(app.time);
        redraw_cached(model);
    } else {
        advance_animation(app, model);
    }

    // Handle FPS and origin display
    if model.debug_flag {
        draw_debug_overlay(model);
    }

    // Render the frame's draw list into the texture
    render_to_texture(app, model);
}

// Draw the state of Model into the given Frame
fn view(_app: &App, model: &Model, frame: Frame) {
    // resize texture to screen
    let mut encoder = frame.command_encoder();

    model
        .texture_reshaper
        .encode_render_pass(frame.texture_view(), &mut encoder);
}

// *********************** Main per-frame animation step ***********************

fn advance_animation(app: &App, model: &mut Model) {
    let elapsed = model.clock.advance(app.time);

    let Model {
        ref timeline,
        ref mut quads,
        ref draw,
        ref colors,
        ..
    } = *model;

    for phase in timeline.active_phases(elapsed) {
        phase.apply(quads, elapsed);

        for (quad, &color) in quads.iter_mut().zip(colors.iter()) {
            match phase.pivot() {
                Pivot::Center => quad.update_transform(),
                Pivot::Origin => quad.update_offset_rotation(),
            }
            quad.draw(draw, color);
        }
    }

    // Past the last phase: invalidate the clock so the next frame
    // re-anchors the cycle start and the sequence plays again
    if timeline.is_cycle_complete(elapsed) {
        model.clock.restart_cycle();
    }
}

fn redraw_cached(model: &Model) {
    for (quad, &color) in model.quads.iter().zip(model.colors.iter()) {
        quad.draw(&model.draw, color);
    }
}

// ******************************* Input *******************************

fn process_input(app: &App, model: &mut Model) {
    let keys = &app.keys.down;

    if keys.contains(&Key::Escape) {
        app.quit();
    }
    if keys.contains(&Key::Space) {
        model.playback.pause();
    }
    if keys.contains(&Key::Return) {
        model.playback.play();
    }
}

// ******************************* Rendering *******************************

fn render_to_texture(app: &App, model: &mut Model) {
    let window = app.main_window();
    let device = window.device();
    let ce_desc = wgpu::CommandEncoderDescriptor {
        label: Some("Texture renderer"),
    };
    let mut encoder = device.create_command_encoder(&ce_desc);
    let texture_view = model.texture.view().build();

    model.draw_renderer.encode_render_pass(
        device,
        &mut encoder,
        &model.draw,
        1.0,
        model.texture.size(),
        &texture_view,
        None,
    );

    window.queue().submit(Some(encoder.finish()));
}

fn draw_debug_overlay(model: &Model) {
    let draw = &model.draw;

    // Draw (+,+) axes
    draw.line()
        .points(pt2(0.0, 0.0), pt2(50.0, 0.0))
        .color(RED)
        .stroke_weight(1.0);
    draw.line()
        .points(pt2(0.0, 0.0), pt2(0.0, 50.0))
        .color(BLUE)
        .stroke_weight(1.0);

    draw.text(&format!("FPS: {:.1}", model.fps))
        .x_y(190.0, 230.0)
        .color(RED);
}
