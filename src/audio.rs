use crate::constants::*;
use crate::core::{AudioEngine, ClipRamp, Note, SampleId, StageError};
use anyhow::anyhow;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Entry point of the synth's effect chain.
pub struct SynthBus {
    pub input: web::GainNode,
}

// The single sounding note of the monophonic synth.
struct Voice {
    osc: web::OscillatorNode,
    env: web::GainNode,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| {
        log::error!("[audio] {} GainNode error: {:?}", label, e);
        anyhow!("{} GainNode error", label)
    })?;
    g.gain().set_value(value);
    Ok(g)
}

// Short procedural room: stereo noise with an exponential tail.
fn build_impulse(audio_ctx: &web::AudioContext, seconds: f32) -> Option<web::AudioBuffer> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * seconds) as u32;
    let ir = audio_ctx.create_buffer(2, len.max(1), sr).ok()?;
    let mut seeds: [u32; 2] = [0x1234ABCD, 0x7890FEDC];
    for (ch, seed) in seeds.iter_mut().enumerate() {
        let mut buf: Vec<f32> = Vec::with_capacity(len as usize);
        for i in 0..len {
            // xorshift32
            let mut x = *seed;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *seed = x;
            let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let t = i as f32 / sr;
            buf.push(n * (-t * 6.0 / seconds).exp());
        }
        _ = ir.copy_to_channel(&mut buf, ch as i32);
    }
    Some(ir)
}

/// synth -> [dry, feedback delay -> reverb, reverb] -> master -> destination
pub fn build_synth_bus(audio_ctx: &web::AudioContext) -> anyhow::Result<SynthBus> {
    let master_gain = create_gain(audio_ctx, MASTER_GAIN, "Master")?;
    _ = master_gain.connect_with_audio_node(&audio_ctx.destination());

    let input = create_gain(audio_ctx, 1.0, "Synth in")?;
    let dry = create_gain(audio_ctx, DRY_GAIN, "Dry")?;
    _ = input.connect_with_audio_node(&dry);
    _ = dry.connect_with_audio_node(&master_gain);

    let reverb_in = create_gain(audio_ctx, 1.0, "Reverb in")?;
    let reverb = web::ConvolverNode::new(audio_ctx).map_err(|e| {
        log::error!("[audio] ConvolverNode error: {:?}", e);
        anyhow!("ConvolverNode error")
    })?;
    reverb.set_normalize(true);
    if let Some(ir) = build_impulse(audio_ctx, REVERB_DECAY_SEC) {
        reverb.set_buffer(Some(&ir));
    }
    let reverb_wet = create_gain(audio_ctx, REVERB_WET, "Reverb wet")?;
    _ = reverb_in.connect_with_audio_node(&reverb);
    _ = reverb.connect_with_audio_node(&reverb_wet);
    _ = reverb_wet.connect_with_audio_node(&master_gain);
    _ = input.connect_with_audio_node(&reverb_in);

    let delay = audio_ctx
        .create_delay_with_max_delay_time(2.0)
        .map_err(|e| {
            log::error!("[audio] DelayNode error: {:?}", e);
            anyhow!("DelayNode error")
        })?;
    delay.delay_time().set_value(DELAY_TIME_SEC as f32);
    let delay_feedback = create_gain(audio_ctx, DELAY_FEEDBACK, "Delay feedback")?;
    _ = input.connect_with_audio_node(&delay);
    _ = delay.connect_with_audio_node(&delay_feedback);
    _ = delay_feedback.connect_with_audio_node(&delay);
    _ = delay.connect_with_audio_node(&reverb_in);

    Ok(SynthBus { input })
}

/// Fetch and decode the finale clip into `slot`. Until this finishes the
/// engine reports the clip as not ready.
pub async fn load_clip(
    audio_ctx: web::AudioContext,
    url: &str,
    slot: Rc<RefCell<Option<web::AudioBuffer>>>,
) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        return Err(anyhow!("fetch {}: HTTP {}", url, resp.status()));
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow!("array_buffer: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow!("array_buffer: {:?}", e))?
    .dyn_into()
    .map_err(|e| anyhow!("not an ArrayBuffer: {:?}", e))?;
    let decoded: web::AudioBuffer = JsFuture::from(
        audio_ctx
            .decode_audio_data(&bytes)
            .map_err(|e| anyhow!("decode: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow!("decode: {:?}", e))?
    .dyn_into()
    .map_err(|e| anyhow!("not an AudioBuffer: {:?}", e))?;
    log::info!("[audio] clip loaded and decoded ({:.1}s)", decoded.duration());
    *slot.borrow_mut() = Some(decoded);
    Ok(())
}

/// WebAudio implementation of [`AudioEngine`].
pub struct WebAudio {
    ctx: web::AudioContext,
    bus: SynthBus,
    voice: Option<Voice>,
    last_hz: Option<f32>,
    samples: FnvHashMap<SampleId, web::HtmlAudioElement>,
    clip: Rc<RefCell<Option<web::AudioBuffer>>>,
    clip_source: Option<web::AudioBufferSourceNode>,
}

impl WebAudio {
    pub fn new(ctx: web::AudioContext, document: &web::Document) -> anyhow::Result<Self> {
        let bus = build_synth_bus(&ctx)?;
        let mut samples = FnvHashMap::default();
        for (id, selector) in [
            (SampleId::Kick, KICK_SAMPLE_SELECTOR),
            (SampleId::Snare, SNARE_SAMPLE_SELECTOR),
        ] {
            match document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
            {
                Some(el) => {
                    samples.insert(id, el);
                }
                None => log::warn!("[audio] missing {}", selector),
            }
        }
        for (id, url) in [
            (SampleId::Glitch, GLITCH_SAMPLE_URL),
            (SampleId::Crackle, CRACKLE_SAMPLE_URL),
        ] {
            let el = web::HtmlAudioElement::new_with_src(url)
                .map_err(|e| anyhow!("audio element {}: {:?}", url, e))?;
            samples.insert(id, el);
        }
        Ok(Self {
            ctx,
            bus,
            voice: None,
            last_hz: None,
            samples,
            clip: Rc::new(RefCell::new(None)),
            clip_source: None,
        })
    }

    pub fn clip_slot(&self) -> Rc<RefCell<Option<web::AudioBuffer>>> {
        self.clip.clone()
    }

    /// Browsers keep the context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }
}

impl AudioEngine for WebAudio {
    fn play_note(&mut self, note: &Note) {
        self.release_note();
        let hz = note.frequency_hz();
        let Ok(osc) = web::OscillatorNode::new(&self.ctx) else {
            return;
        };
        osc.set_type(web::OscillatorType::Sawtooth);
        let now = self.ctx.current_time();
        match self.last_hz {
            Some(prev) => {
                _ = osc.frequency().set_value_at_time(prev, now);
                _ = osc
                    .frequency()
                    .exponential_ramp_to_value_at_time(hz, now + SYNTH_PORTAMENTO_SEC);
            }
            None => osc.frequency().set_value(hz),
        }
        let Ok(env) = create_gain(&self.ctx, 0.0, "Voice env") else {
            return;
        };
        _ = env.gain().set_value_at_time(SYNTH_LEVEL, now);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(SYNTH_LEVEL * SYNTH_SUSTAIN, now + SYNTH_DECAY_SEC);
        _ = osc.connect_with_audio_node(&env);
        _ = env.connect_with_audio_node(&self.bus.input);
        _ = osc.start_with_when(now);
        self.last_hz = Some(hz);
        self.voice = Some(Voice { osc, env });
    }

    fn release_note(&mut self) {
        if let Some(v) = self.voice.take() {
            let now = self.ctx.current_time();
            _ = v.env.gain().cancel_scheduled_values(now);
            _ = v.env.gain().set_value_at_time(0.0, now);
            _ = v.osc.stop_with_when(now + 0.01);
        }
    }

    fn play_sample(&mut self, id: SampleId) {
        if let Some(el) = self.samples.get(&id) {
            el.set_current_time(0.0);
            if el.paused() {
                _ = el.play();
            }
        }
    }

    fn clip_duration(&self) -> Option<f64> {
        self.clip.borrow().as_ref().map(|b| b.duration())
    }

    fn play_clip(&mut self, ramp: ClipRamp) -> Result<f64, StageError> {
        let buffer = self
            .clip
            .borrow()
            .clone()
            .ok_or(StageError::ResourceNotReady)?;
        if let Some(old) = self.clip_source.take() {
            _ = old.stop_with_when(0.0);
        }
        let src = self
            .ctx
            .create_buffer_source()
            .map_err(|_| StageError::UnsupportedCapability("AudioBufferSourceNode"))?;
        src.set_buffer(Some(&buffer));
        let gain = web::GainNode::new(&self.ctx)
            .map_err(|_| StageError::UnsupportedCapability("GainNode"))?;
        let now = self.ctx.current_time();
        let remaining = (buffer.duration() - ramp.offset_sec).max(0.0);
        _ = gain.gain().set_value_at_time(ramp.from_gain, now);
        _ = gain
            .gain()
            .exponential_ramp_to_value_at_time(1.0, now + ramp.fade_sec);
        _ = src.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.ctx.destination());
        _ = src.start_with_when_and_grain_offset_and_grain_duration(now, ramp.offset_sec, remaining);
        self.clip_source = Some(src);
        Ok(remaining)
    }
}
