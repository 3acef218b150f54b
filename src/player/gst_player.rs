use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::player::PlayerError;
use crate::player::media_element::{MediaElement, SeekUnit};

const VIDEO_SINK: &str =
    "videoconvert ! videoscale ! video/x-raw,format=RGBA ! appsink name=sink";

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Media metadata is known and the first frame is prerolled.
    Ready,
    /// The pipeline failed and cannot play any further.
    Error(String),
}

/// GStreamer `playbin` whose video branch ends in an RGBA appsink.
pub struct GstPlayer {
    pipeline: gst::Pipeline,
    sink: gst_app::AppSink,
    ready: bool,
    at_end: bool,
}

impl GstPlayer {
    pub fn new(uri: &str) -> Result<Self, PlayerError> {
        gst::init()?;

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri)
            .build()?;
        let video_sink = gst::parse::bin_from_description(VIDEO_SINK, true)?;
        let sink = video_sink
            .by_name("sink")
            .ok_or(PlayerError::MissingSink)?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| PlayerError::MissingSink)?;

        // Only the newest frame matters for display
        sink.set_max_buffers(1);
        sink.set_drop(true);
        playbin.set_property("video-sink", &video_sink);

        let pipeline = playbin
            .downcast::<gst::Pipeline>()
            .map_err(|_| PlayerError::NotAPipeline)?;
        pipeline.set_state(gst::State::Paused)?;
        log::info!("Opened {}", uri);

        Ok(Self {
            pipeline,
            sink,
            ready: false,
            at_end: false,
        })
    }

    /// Drains the pipeline bus without blocking.
    pub fn poll_events(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        let Some(bus) = self.pipeline.bus() else {
            return events;
        };

        while let Some(msg) = bus.pop() {
            match msg.view() {
                // Also posted after every flushing seek, only the first one counts
                gst::MessageView::AsyncDone(_) if !self.ready => {
                    self.ready = true;
                    log::debug!("Pipeline prerolled");
                    events.push(PlayerEvent::Ready);
                }
                gst::MessageView::Eos(_) => {
                    log::debug!("End of stream");
                    self.at_end = true;
                }
                gst::MessageView::Error(err) => {
                    log::error!(
                        "Pipeline error: {} ({:?})",
                        err.error(),
                        err.debug()
                    );
                    events.push(PlayerEvent::Error(err.error().to_string()));
                }
                gst::MessageView::Warning(warn) => {
                    log::warn!("Pipeline warning: {}", warn.error());
                }
                _ => {}
            }
        }
        events
    }

    /// Pulls the newest decoded frame, if a new one arrived since the last call.
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        let mut latest = None;
        while let Some(sample) = self.sink.try_pull_sample(gst::ClockTime::ZERO) {
            latest = Some(sample);
        }
        let sample = latest?;

        let caps = sample.caps()?;
        let info = match gst_video::VideoInfo::from_caps(caps) {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Unusable frame caps: {}", e);
                return None;
            }
        };
        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;

        let (width, height) = (info.width(), info.height());
        let row_len = width as usize * 4;
        let stride = info.stride()[0] as usize;
        let src = map.as_slice();
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in src.chunks(stride).take(height as usize) {
            data.extend_from_slice(row.get(..row_len)?);
        }

        Some(VideoFrame {
            data,
            width,
            height,
        })
    }
}

fn seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

impl MediaElement for GstPlayer {
    fn current_time(&self) -> f64 {
        // Position queries after EOS are unreliable
        if self.at_end {
            return self.duration();
        }
        self.pipeline
            .query_position::<gst::ClockTime>()
            .map(seconds)
            .unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.pipeline
            .query_duration::<gst::ClockTime>()
            .map(seconds)
            .unwrap_or(0.0)
    }

    fn seek_to(&mut self, value: f64, unit: SeekUnit) -> Result<(), PlayerError> {
        let target = match unit {
            SeekUnit::Seconds => value,
        };
        let seek_time_ns = (target.max(0.0) * 1_000_000_000.0) as u64;
        log::debug!("Seeking to {} ns ({} seconds)", seek_time_ns, target);

        self.pipeline.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::ClockTime::from_nseconds(seek_time_ns),
        )?;
        self.at_end = false;
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError> {
        if playing && self.at_end {
            self.seek_to(0.0, SeekUnit::Seconds)?;
        }
        let state = if playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        };
        self.pipeline.set_state(state)?;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.pipeline.set_property("mute", muted);
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            log::warn!("Failed to shut down pipeline: {}", e);
        }
    }
}
