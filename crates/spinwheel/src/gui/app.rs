use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view;
use crate::wheel::{self, FrameInput, InteractionState, RandSource, Snapshot};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wheelfeed::feed::DetectorFrame;
use wheelfeed::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Waiting,
    Live,
    TimedOut,
}

impl FeedStatus {
    fn message(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting for hand tracker...",
            Self::Live => "",
            Self::TimedOut => "No hand tracker connected. Start a detector or `wheelfeed replay`.",
        }
    }

    fn css_classes(&self) -> &'static [&'static str] {
        match self {
            Self::TimedOut => &["spinwheel-status", "error"],
            _ => &["spinwheel-status"],
        }
    }
}

pub struct AppModel {
    pub config: Config,
    pub interaction: InteractionState,
    pub snapshot: Rc<RefCell<Option<Snapshot>>>,
    pub feed: FeedStatus,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    source: RandSource,
}

#[derive(Debug)]
pub enum AppMsg {
    Frame(DetectorFrame),
    Reset,
    Resize(i32, i32),
    ConfigReload,
    FeedTimeout,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Frame(frame) => AppMsg::Frame(frame),
            AppEvent::Reset => AppMsg::Reset,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn viewport(&self) -> Size {
        Size::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }

    fn publish(&self, snapshot: Snapshot) {
        *self.snapshot.borrow_mut() = Some(snapshot);
        self.drawing_area.queue_draw();
    }

    fn on_frame(&mut self, frame: DetectorFrame) {
        if self.feed != FeedStatus::Live {
            log::info!("Hand tracker feed is live");
            self.feed = FeedStatus::Live;
        }

        let was_spinning = self.interaction.is_spinning();
        let input = FrameInput::from_frame(&frame, self.viewport());
        let snapshot =
            wheel::process_frame(&mut self.interaction, &input, &self.config, &mut self.source);
        if was_spinning && !self.interaction.is_spinning() {
            log::info!(
                "Wheel stopped on color {} (hue {})",
                snapshot.selected_index,
                snapshot.selected_hue()
            );
        }
        self.publish(snapshot);
    }

    fn relayout(&mut self) {
        let viewport = self.viewport();
        let snapshot = wheel::relayout(&mut self.interaction, viewport, &self.config);
        self.publish(snapshot);
    }

    fn apply_config(&mut self, new_config: Config) {
        if new_config.feed.socket_path != self.config.feed.socket_path {
            log::warn!(
                "Feed socket changed to {}; restart to listen there",
                new_config.feed.socket_path
            );
        }
        self.interaction.set_num_colors(new_config.wheel.num_colors);
        self.config = new_config;
        self.relayout();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spinwheel"),
            set_default_size: (1280, 720),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    set_wrap: true,
                    #[watch]
                    set_label: model.feed.message(),
                    #[watch]
                    set_visible: model.feed != FeedStatus::Live,
                    #[watch]
                    set_css_classes: model.feed.css_classes(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let timeout_secs = config.feed.timeout_secs;
        let mut model = AppModel {
            interaction: InteractionState::new(config.wheel.num_colors),
            config,
            snapshot: Rc::new(RefCell::new(None)),
            feed: FeedStatus::Waiting,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            source: RandSource::thread(),
        };

        let widgets = view_output!();
        model.drawing_area = widgets.drawing_area.clone();

        let snapshot_draw = model.snapshot.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let snapshot = snapshot_draw.borrow();
                let Some(snapshot) = snapshot.as_ref() else {
                    return;
                };
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = view::draw(cr, snapshot, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        if timeout_secs > 0 {
            let sender_timeout = sender.clone();
            glib::timeout_add_seconds_local_once(timeout_secs, move || {
                sender_timeout.input(AppMsg::FeedTimeout);
            });
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Frame(frame) => self.on_frame(frame),
            AppMsg::Reset => {
                self.interaction.reset_gestures();
                self.relayout();
                log::info!("Gesture state reset");
            }
            AppMsg::Resize(width, height) => {
                log::debug!("Viewport resized to {}x{}", width, height);
                self.relayout();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::FeedTimeout => {
                if self.feed == FeedStatus::Waiting {
                    log::warn!(
                        "No tracker frame within {} seconds",
                        self.config.feed.timeout_secs
                    );
                    self.feed = FeedStatus::TimedOut;
                }
            }
            AppMsg::Quit => self.root.close(),
        }
    }
}
