/// How the decorative background is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropMode {
    /// WebGL is available: shader background, keyboard shown.
    Shader,
    /// No WebGL: animated CSS gradient plus setup instructions.
    CssFallback,
    /// Phone or tablet: keyboard hidden, a notice shown instead.
    MobileNotice,
}

impl BackdropMode {
    pub fn choose(webgl_available: bool, mobile: bool) -> Self {
        if mobile {
            BackdropMode::MobileNotice
        } else if webgl_available {
            BackdropMode::Shader
        } else {
            BackdropMode::CssFallback
        }
    }

    /// Text for the version badge.
    pub fn badge(self) -> &'static str {
        match self {
            BackdropMode::Shader => ".WebGL",
            BackdropMode::CssFallback | BackdropMode::MobileNotice => ".CSS",
        }
    }
}

const MOBILE_AGENTS: [&str; 5] = ["android", "webos", "blackberry", "iemobile", "opera mini"];
const APPLE_AGENTS: [&str; 3] = ["iphone", "ipad", "ipod"];

/// Touch-capable device that is either a known phone/tablet or has a
/// small viewport.
pub fn is_mobile(user_agent: &str, touch_capable: bool, viewport_width: f64) -> bool {
    if !touch_capable {
        return false;
    }
    let ua = user_agent.to_ascii_lowercase();
    APPLE_AGENTS.iter().any(|a| ua.contains(a))
        || MOBILE_AGENTS.iter().any(|a| ua.contains(a))
        || viewport_width <= 1024.0
}
