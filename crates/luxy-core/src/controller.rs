//! The parallax controller: the scroll loop, the resize loop and the resize debounce.
//!
//! The controller owns no callbacks. Its host schedules frames and timers and
//! calls back into [`Controller::on_frame`], [`Controller::on_resize`] and
//! [`Controller::on_debounce_elapsed`]; the controller decides what each call
//! does and whether the chain continues. Stale invocations (a frame that was
//! already dispatched when its loop was cancelled) are recognized and ignored.

use crate::config::{Options, Settings, SmoothingMode};
use crate::debounce::Debouncer;
use crate::error::{LuxyError, Result};
use crate::host::{Host, Loop};
use crate::smoothing::{approach, scaled_rate, wrapper_transform};
use crate::target::{Target, TargetAttributes, TargetParams};

struct LoopSlot<F> {
    running: bool,
    pending: Option<F>,
}

impl<F> Default for LoopSlot<F> {
    fn default() -> Self {
        Self {
            running: false,
            pending: None,
        }
    }
}

/// Everything that exists between `init` and `cancel`.
struct Active<H: Host> {
    settings: Settings,
    wrapper: H::Element,
    targets: Vec<Target<H::Element>>,
    wrapper_offset: f64,
    scroll_top: f64,
    window_height: f64,
    last_frame_ms: Option<f64>,
    scroll: LoopSlot<H::FrameId>,
    resize: LoopSlot<H::FrameId>,
    debounce: Debouncer<H::TimerId>,
}

pub struct Controller<H: Host> {
    active: Option<Active<H>>,
}

impl<H: Host> Default for Controller<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: Host> Controller<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the markup, apply base styles, register targets and start both loops.
    ///
    /// The wrapper lookup and target query happen before anything is touched:
    /// on error the page and any previous initialization are left as they were.
    pub fn init(&mut self, host: &H, options: &Options) -> Result<()> {
        let settings = Settings::merged(options);
        let wrapper = host
            .element_by_id(&settings.wrapper_id)
            .ok_or_else(|| LuxyError::WrapperNotFound {
                id: settings.wrapper_id.clone(),
            })?;
        let elements = host.query_all(&settings.target_class)?;

        if self.active.is_some() {
            log::info!("[luxy] re-initializing; tearing down previous state");
            self.cancel(host);
        }

        host.set_body_height(host.client_height(&wrapper));
        host.set_style(&wrapper, "width", "100%");
        host.set_style(&wrapper, "position", "fixed");

        let targets: Vec<_> = elements
            .into_iter()
            .map(|el| {
                let attrs = TargetAttributes::read(|name| host.attribute(&el, name));
                Target::new(el, TargetParams::parse(&attrs))
            })
            .collect();
        log::info!(
            "[luxy] init wrapper=#{} targets={} ({})",
            settings.wrapper_id,
            targets.len(),
            settings.target_class
        );

        let active = self.active.insert(Active {
            settings,
            wrapper,
            targets,
            wrapper_offset: 0.0,
            scroll_top: 0.0,
            window_height: host.viewport_height(),
            last_frame_ms: None,
            scroll: LoopSlot::default(),
            resize: LoopSlot::default(),
            debounce: Debouncer::new(),
        });
        let started = active.start_loops(host).and_then(|_| host.listen_resize());
        if let Err(e) = started {
            log::error!("[luxy] init failed to start: {e}");
            self.cancel(host);
            return Err(e);
        }
        Ok(())
    }

    /// Stop both loops, strip injected styles and forget all state. Safe to call repeatedly.
    pub fn cancel(&mut self, host: &H) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        // invalidate loop and timer handles before anything they could touch goes away
        active.stop_loops(host);
        if let Some(timer) = active.debounce.reset() {
            host.clear_timer(timer);
        }
        host.unlisten_resize();
        host.clear_styles(&active.wrapper);
        for target in &active.targets {
            host.clear_styles(&target.el);
        }
        host.clear_body_height();
        log::info!("[luxy] cancelled");
    }

    /// One animation-frame callback for `which`. `timestamp_ms` is the frame time from the host.
    pub fn on_frame(&mut self, host: &H, which: Loop, timestamp_ms: f64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let slot = active.slot_mut(which);
        if !slot.running {
            return;
        }
        slot.pending = None;

        let reschedule = match which {
            Loop::Scroll => {
                active.scroll_tick(host, timestamp_ms);
                true
            }
            Loop::Resize => {
                active.resize_tick(host);
                active.settings.resize_polling
            }
        };

        let slot = active.slot_mut(which);
        if !reschedule {
            slot.running = false;
            return;
        }
        match host.request_frame(which) {
            Ok(id) => slot.pending = Some(id),
            Err(e) => {
                log::error!("[luxy] {which:?} loop stopped: {e}");
                slot.running = false;
            }
        }
    }

    /// Window `resize` event: pause both loops and (re)arm the restart timer.
    pub fn on_resize(&mut self, host: &H) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let timer = match host.set_timer(active.settings.resize_debounce_ms) {
            Ok(t) => t,
            Err(e) => {
                log::error!("[luxy] resize debounce unavailable: {e}");
                return;
            }
        };
        let (first, superseded) = active.debounce.trigger(timer);
        if let Some(old) = superseded {
            host.clear_timer(old);
        }
        if first {
            log::debug!("[luxy] resize: pausing loops");
            active.stop_loops(host);
        }
    }

    /// The debounce timer fired: restart both loops.
    pub fn on_debounce_elapsed(&mut self, host: &H) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if !active.debounce.elapse() {
            return;
        }
        log::debug!("[luxy] resize settled: restarting loops");
        if let Err(e) = active.start_loops(host) {
            log::error!("[luxy] restart after resize failed: {e}");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_running(&self, which: Loop) -> bool {
        self.active
            .as_ref()
            .map(|a| a.slot(which).running)
            .unwrap_or(false)
    }

    pub fn is_resizing(&self) -> bool {
        self.active
            .as_ref()
            .map(|a| a.debounce.is_pending())
            .unwrap_or(false)
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.active.as_ref().map(|a| &a.settings)
    }

    pub fn wrapper_offset(&self) -> f64 {
        self.active.as_ref().map(|a| a.wrapper_offset).unwrap_or(0.0)
    }

    pub fn scroll_top(&self) -> f64 {
        self.active.as_ref().map(|a| a.scroll_top).unwrap_or(0.0)
    }

    pub fn window_height(&self) -> f64 {
        self.active.as_ref().map(|a| a.window_height).unwrap_or(0.0)
    }

    pub fn targets(&self) -> &[Target<H::Element>] {
        self.active
            .as_ref()
            .map(|a| a.targets.as_slice())
            .unwrap_or(&[])
    }
}

impl<H: Host> Active<H> {
    fn slot(&self, which: Loop) -> &LoopSlot<H::FrameId> {
        match which {
            Loop::Scroll => &self.scroll,
            Loop::Resize => &self.resize,
        }
    }

    fn slot_mut(&mut self, which: Loop) -> &mut LoopSlot<H::FrameId> {
        match which {
            Loop::Scroll => &mut self.scroll,
            Loop::Resize => &mut self.resize,
        }
    }

    fn start_loops(&mut self, host: &H) -> Result<()> {
        self.last_frame_ms = None;
        for which in [Loop::Scroll, Loop::Resize] {
            let id = host.request_frame(which)?;
            let slot = self.slot_mut(which);
            slot.running = true;
            slot.pending = Some(id);
        }
        Ok(())
    }

    fn stop_loops(&mut self, host: &H) {
        for which in [Loop::Scroll, Loop::Resize] {
            let slot = self.slot_mut(which);
            slot.running = false;
            if let Some(id) = slot.pending.take() {
                host.cancel_frame(id);
            }
        }
    }

    /// Smoothing rates for this frame: `(wrapper, target)`.
    fn rates(&mut self, timestamp_ms: f64) -> (f64, f64) {
        let wrapper = self.settings.wrapper_speed;
        let target = self.settings.target_percentage;
        match self.settings.smoothing {
            SmoothingMode::PerFrame => (wrapper, target),
            SmoothingMode::TimeScaled { reference_fps } => {
                let elapsed = self
                    .last_frame_ms
                    .map(|prev| timestamp_ms - prev)
                    .unwrap_or(1000.0 / reference_fps);
                self.last_frame_ms = Some(timestamp_ms);
                (
                    scaled_rate(wrapper, elapsed, reference_fps),
                    scaled_rate(target, elapsed, reference_fps),
                )
            }
        }
    }

    fn scroll_tick(&mut self, host: &H, timestamp_ms: f64) {
        let scroll_top = host.scroll_top();
        self.scroll_top = scroll_top;
        let (wrapper_rate, target_rate) = self.rates(timestamp_ms);

        self.wrapper_offset = approach(self.wrapper_offset, scroll_top, wrapper_rate);
        host.set_style(
            &self.wrapper,
            "transform",
            &wrapper_transform(self.wrapper_offset).to_string(),
        );

        let target_speed = self.settings.target_speed;
        for target in &mut self.targets {
            target.step(scroll_top, target_speed, target_rate);
            host.set_style(&target.el, "transform", &target.transform().to_string());
        }
    }

    fn resize_tick(&mut self, host: &H) {
        self.window_height = host.viewport_height();
        let content = host.client_height(&self.wrapper);
        if host.body_height() != Some(content) {
            host.set_body_height(content);
        }
    }
}
