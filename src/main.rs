use anyhow::{Context, Result};
use swipe_config::SwipeConfig;
use swipe_scene::animation::types::Rect;
use swipe_scene::{GestureSample, Point, SwipeNavigator, TransitionEvent};

const SCREEN_WIDTH: f32 = 390.0;
const SCREEN_HEIGHT: f32 = 844.0;
/// Frames per scripted gesture step.
const STEP_FRAMES: u32 = 2;

/// A recorded edge pan: begin velocity, then translations until release.
struct Swipe {
    name: &'static str,
    begin_velocity: f32,
    translations: &'static [f32],
    release_velocity: f32,
    cancelled: bool,
}

const SCRIPT: &[Swipe] = &[
    Swipe {
        name: "drag left past halfway",
        begin_velocity: -300.0,
        translations: &[-40.0, -110.0, -180.0, -250.0],
        release_velocity: -50.0,
        cancelled: false,
    },
    Swipe {
        name: "short drag right, slow release",
        begin_velocity: 280.0,
        translations: &[30.0, 60.0, 80.0],
        release_velocity: 40.0,
        cancelled: false,
    },
    Swipe {
        name: "quick flick right",
        begin_velocity: 500.0,
        translations: &[25.0, 50.0],
        release_velocity: 900.0,
        cancelled: false,
    },
    Swipe {
        name: "drag left, interrupted",
        begin_velocity: -250.0,
        translations: &[-60.0, -220.0],
        release_velocity: 0.0,
        cancelled: true,
    },
    Swipe {
        name: "drag right on the left page",
        begin_velocity: 300.0,
        translations: &[100.0, 200.0],
        release_velocity: 300.0,
        cancelled: false,
    },
];

fn report(events: Vec<TransitionEvent>) {
    for event in events {
        match event {
            TransitionEvent::Started { direction, interactive, .. } => {
                log::info!("  started {:?} (interactive: {})", direction, interactive)
            }
            TransitionEvent::Settled { completed, .. } => log::info!("  settled, completed: {}", completed),
        }
    }
}

fn play(nav: &mut SwipeNavigator, swipe: &Swipe, frame: f64) {
    log::info!("{} (top page {:?})", swipe.name, nav.top_index());
    report(nav.handle_pan(GestureSample::began(Point::new(swipe.begin_velocity, 0.0))));

    let mut last = 0.0;
    for &tx in swipe.translations {
        report(nav.handle_pan(GestureSample::changed(Point::new(tx, 0.0), Point::new(swipe.begin_velocity, 0.0))));
        for _ in 0..STEP_FRAMES {
            report(nav.advance(frame));
        }
        last = tx;
    }

    let release = if swipe.cancelled {
        GestureSample::cancelled(Point::new(last, 0.0))
    } else {
        GestureSample::ended(Point::new(last, 0.0), Point::new(swipe.release_velocity, 0.0))
    };
    report(nav.handle_pan(release));

    while nav.is_transitioning() {
        report(nav.advance(frame));
    }
    log::info!("  top page now {:?}", nav.top_index());
}

fn main() -> Result<()> {
    env_logger::init();

    let config = SwipeConfig::load();
    log::info!(
        "transition: {:?}, {}s, easing {}",
        config.transition.style,
        config.transition.duration_secs,
        config.transition.easing
    );

    let mut nav = SwipeNavigator::new(Rect::from_size(SCREEN_WIDTH, SCREEN_HEIGHT), &config);
    let camera = nav.tree_mut().create_view("camera preview", Rect::default());
    let left = nav.tree_mut().create_view("chats", Rect::default());
    let right = nav.tree_mut().create_view("stories", Rect::default());
    nav.set_background(camera);
    nav.set_pages(&[left, right]).context("installing pages")?;

    let frame = config.playback.frame_interval_secs.max(1e-3);
    for swipe in SCRIPT {
        play(&mut nav, swipe, frame);
    }

    log::info!("programmatic switch to the right page");
    report(nav.show_page(1, true).context("show_page")?);
    while nav.is_transitioning() {
        report(nav.advance(frame));
    }
    log::info!("done, top page {:?}", nav.top_index());
    Ok(())
}
