//! Navigation plan display layer

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::bus::SubscriptionService;
use image::RgbaImage;
use log::{info, warn};
use std::path::Path;

use super::{draw_frame, report_frame, DisplayPlugin};
use crate::{
    config::{ConfigError, DrawStyle, PlanDisplaySettings},
    plan_state::PlanState,
    render::{generate_icon, Canvas, Rgba},
    status::StatusLine,
    tf::TransformProvider,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Display layer drawing the newest navigation plan and the position along it.
pub struct NavPlanPlugin<C, S, T> {
    settings: PlanDisplaySettings,
    state: PlanState,

    service: S,
    tf: T,

    /// Canvas to draw on, set by `initialise`
    canvas: Option<C>,

    status: StatusLine,

    /// Icon for the current style, regenerated whenever the style or colour changes
    icon: RgbaImage,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C, S, T> NavPlanPlugin<C, S, T>
where
    C: Canvas,
    S: SubscriptionService,
    T: TransformProvider,
{
    /// Create a plugin with default settings and no topics subscribed.
    pub fn new(service: S, tf: T) -> Self {
        let settings = PlanDisplaySettings::default();
        let icon = generate_icon(&settings.draw_style, settings.color);

        Self {
            settings,
            state: PlanState::new(),
            service,
            tf,
            canvas: None,
            status: StatusLine::new(),
            icon,
        }
    }

    pub fn settings(&self) -> &PlanDisplaySettings {
        &self.settings
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    /// Remove the canvas from the plugin, after which nothing is drawn until it is initialised
    /// again.
    pub fn take_canvas(&mut self) -> Option<C> {
        self.canvas.take()
    }

    /// Set the topic plans are received on.
    pub fn set_topic(&mut self, topic: &str) -> Result<(), ConfigError> {
        self.settings.topic = topic.trim().to_string();
        self.state.set_plan_topic(&self.service, topic)?;
        Ok(())
    }

    /// Set the topic plan tracks are received on.
    pub fn set_position_topic(&mut self, topic: &str) -> Result<(), ConfigError> {
        self.settings.position_topic = topic.trim().to_string();
        self.state.set_track_topic(&self.service, topic)?;
        Ok(())
    }

    pub fn set_draw_style(&mut self, style: DrawStyle) {
        self.settings.draw_style = style;
        self.update_icon();
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.settings.color = color;
        self.update_icon();
    }

    pub fn set_position_color(&mut self, color: Rgba) {
        self.settings.position_color = color;
    }

    pub fn set_marker_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.settings.marker_size = size;
        } else {
            warn!("Ignoring invalid marker size {}", size);
        }
    }

    /// Apply settings from a TOML string, resubscribing if the topics changed.
    pub fn load_config(&mut self, config_str: &str) -> Result<(), ConfigError> {
        self.settings.load_str(config_str)?;
        self.apply_settings()
    }

    /// Apply settings from a TOML file, resubscribing if the topics changed.
    pub fn load_config_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        self.settings.load_path(path)?;
        self.apply_settings()
    }

    pub fn save_config(&self) -> Result<String, ConfigError> {
        self.settings.save_string()
    }

    pub fn save_config_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.settings.save_path(path)
    }

    /// Take any pending plans and tracks from the subscriptions.
    pub fn process_messages(&mut self) {
        self.state.process_messages();
    }

    fn apply_settings(&mut self) -> Result<(), ConfigError> {
        self.state
            .set_plan_topic(&self.service, &self.settings.topic)?;
        self.state
            .set_track_topic(&self.service, &self.settings.position_topic)?;
        self.update_icon();

        Ok(())
    }

    fn update_icon(&mut self) {
        self.icon = generate_icon(&self.settings.draw_style, self.settings.color);
    }
}

impl<C, S, T> DisplayPlugin for NavPlanPlugin<C, S, T>
where
    C: Canvas,
    S: SubscriptionService,
    T: TransformProvider,
{
    type Canvas = C;

    fn initialise(&mut self, canvas: C) -> bool {
        self.canvas = Some(canvas);

        info!(
            "Plan display initialised (plan topic \"{}\", track topic \"{}\")",
            self.settings.topic, self.settings.position_topic
        );

        true
    }

    fn draw(&mut self, x: f64, y: f64, scale: f64) {
        let canvas = match self.canvas.as_mut() {
            Some(c) => c,
            None => return,
        };

        canvas.set_view(x, y, scale);

        let result = draw_frame(
            canvas,
            &self.tf,
            self.state.plan(),
            self.state.track(),
            &self.settings,
        );

        report_frame(&mut self.status, &result);
    }

    fn icon(&self) -> RgbaImage {
        self.icon.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        render::{PrimitiveList, ICON_SIZE_PX},
        status::StatusLevel,
        tf::StaticTransforms,
    };
    use crate::tf::{TfError, Transform};
    use approx::assert_relative_eq;
    use chrono::{DateTime, Utc};
    use comms_if::{
        bus::TopicBus,
        nav::{Plan, PlanPosition, PlanTrack},
    };
    use std::{cell::Cell, rc::Rc};

    /// Transforms into "/map" which can be switched off from outside the plugin.
    struct SwitchedTf {
        available: Rc<Cell<bool>>,
    }

    impl TransformProvider for SwitchedTf {
        fn target_frame(&self) -> &str {
            "/map"
        }

        fn lookup(&self, source_frame: &str, _stamp: DateTime<Utc>) -> Result<Transform, TfError> {
            if self.available.get() {
                Ok(Transform::identity())
            } else {
                Err(TfError::UnknownFrame(source_frame.to_string()))
            }
        }
    }

    type TestPlugin = NavPlanPlugin<PrimitiveList, TopicBus, StaticTransforms>;

    fn plugin(bus: &TopicBus) -> TestPlugin {
        let mut plugin = NavPlanPlugin::new(bus.clone(), StaticTransforms::new("/wgs84"));
        plugin.set_topic("/plan").unwrap();
        plugin.set_position_topic("/plan_track").unwrap();
        assert!(plugin.initialise(PrimitiveList::new()));
        plugin
    }

    #[test]
    fn test_line_with_marker() {
        let bus = TopicBus::new();
        let mut plugin = plugin(&bus);

        bus.publish("/plan", Plan::from_xy("route", &[(0.0, 0.0), (10.0, 0.0)]))
            .unwrap();
        bus.publish("/plan_track", PlanTrack::new("route", PlanPosition::along(5.0)))
            .unwrap();
        plugin.process_messages();

        plugin.draw(0.0, 0.0, 1.0);

        assert_eq!(plugin.status().level(), StatusLevel::Info);
        assert_eq!(plugin.status().message(), "OK");

        let canvas = plugin.canvas().unwrap();
        assert_eq!(canvas.view(), Some((0.0, 0.0, 1.0)));
        assert_eq!(canvas.num_line_strips(), 1);

        // The marker's nose is one marker length ahead of the position along +X
        let (marker, _) = canvas.polygons().pop().unwrap();
        assert_relative_eq!(marker[0].x, 5.0 + 15.0, epsilon = 1e-9);
        assert_relative_eq!(marker[0].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_status_follows_state() {
        let bus = TopicBus::new();
        let mut plugin = plugin(&bus);

        plugin.draw(0.0, 0.0, 1.0);
        assert_eq!(plugin.status().level(), StatusLevel::Error);
        assert_eq!(plugin.status().message(), "No valid route received.");

        bus.publish("/plan", Plan::from_xy("route", &[(0.0, 0.0), (1.0, 1.0)]))
            .unwrap();
        bus.publish("/plan_track", PlanTrack::new("stale", PlanPosition::along(0.5)))
            .unwrap();
        plugin.process_messages();
        plugin.draw(0.0, 0.0, 1.0);
        assert_eq!(plugin.status().level(), StatusLevel::Error);
        assert_eq!(
            plugin.status().message(),
            "Failed to find plan position in plan."
        );

        // Changing the plan topic drops the held plan
        plugin.set_topic("/plan_2").unwrap();
        plugin.draw(0.0, 0.0, 1.0);
        assert_eq!(plugin.status().message(), "No valid route received.");
    }

    #[test]
    fn test_recovers_when_transform_returns() {
        let bus = TopicBus::new();
        let available = Rc::new(Cell::new(false));
        let mut plugin: NavPlanPlugin<PrimitiveList, TopicBus, SwitchedTf> = NavPlanPlugin::new(
            bus.clone(),
            SwitchedTf {
                available: available.clone(),
            },
        );
        plugin.set_topic("/plan").unwrap();
        assert!(plugin.initialise(PrimitiveList::new()));

        let mut plan = Plan::from_xy("route", &[(0.0, 0.0), (10.0, 0.0)]);
        plan.header.frame_id = "/odom".into();
        bus.publish("/plan", plan).unwrap();
        plugin.process_messages();

        plugin.draw(0.0, 0.0, 1.0);
        assert_eq!(plugin.status().level(), StatusLevel::Error);
        assert_eq!(plugin.status().message(), "Failed to transform route");
        assert_eq!(plugin.canvas().unwrap().num_line_strips(), 0);

        // The held plan is drawn as soon as the transform becomes available
        available.set(true);
        plugin.draw(0.0, 0.0, 1.0);
        assert_eq!(plugin.status().level(), StatusLevel::Info);
        assert_eq!(plugin.status().message(), "OK");
        assert_eq!(plugin.canvas().unwrap().num_line_strips(), 1);
    }

    #[test]
    fn test_draw_before_initialise() {
        let bus = TopicBus::new();
        let mut plugin: TestPlugin = NavPlanPlugin::new(bus, StaticTransforms::new("/map"));

        plugin.draw(0.0, 0.0, 1.0);
        assert!(plugin.canvas().is_none());
        assert_eq!(plugin.status().message(), "");
    }

    #[test]
    fn test_load_config_resubscribes() {
        let bus = TopicBus::new();
        let mut plugin = plugin(&bus);

        plugin
            .load_config(
                r#"
                topic = "/other_plan"
                draw_style = "points"
                "#,
            )
            .unwrap();

        assert_eq!(plugin.state().plan_topic(), "/other_plan");
        assert_eq!(plugin.state().track_topic(), "/plan_track");
        assert_eq!(plugin.settings().draw_style, DrawStyle::points());

        assert_eq!(bus.publish("/plan", Plan::from_xy("a", &[])).unwrap(), 0);
        assert_eq!(bus.publish("/other_plan", Plan::from_xy("a", &[])).unwrap(), 1);

        let saved = plugin.save_config().unwrap();
        assert!(saved.contains("/other_plan"));
        assert!(saved.contains("points"));
    }

    #[test]
    fn test_icon_follows_style() {
        let bus = TopicBus::new();
        let mut plugin = plugin(&bus);

        let icon = plugin.icon();
        assert_eq!(icon.dimensions(), (ICON_SIZE_PX, ICON_SIZE_PX));

        // (2, 13) lies on the line but outside the dot
        assert_eq!(icon.get_pixel(2, 13).0[3], 255);

        plugin.set_draw_style(DrawStyle::points());
        plugin.set_color(Rgba::RED);
        let icon = plugin.icon();
        assert_eq!(icon.get_pixel(2, 13).0[3], 0);
        assert_eq!(icon.get_pixel(8, 8).0, [255, 0, 0, 255]);
    }
}
