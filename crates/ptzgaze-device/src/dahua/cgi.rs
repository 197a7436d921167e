use ptzgaze_orient::OrientationAngles;
use serde::{Deserialize, Serialize};

use crate::error::DeviceError;

const HTTP_PORT: u16 = 80;
const RTSP_PORT: u16 = 554;
const CHANNEL: u32 = 1;

fn default_http_port() -> u16 {
    HTTP_PORT
}

fn default_rtsp_port() -> u16 {
    RTSP_PORT
}

fn default_channel() -> u32 {
    CHANNEL
}

/// Connection settings of a Dahua camera.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DahuaConfig {
    /// The camera host name or address.
    pub host: String,
    /// The HTTP port of the CGI interface.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// The RTSP port of the video stream.
    #[serde(default = "default_rtsp_port")]
    pub rtsp_port: u16,
    /// The account name.
    pub username: String,
    /// The account password.
    pub password: String,
    /// The one based video channel.
    #[serde(default = "default_channel")]
    pub channel: u32,
}

impl std::fmt::Debug for DahuaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DahuaConfig")
            .field("host", &self.host)
            .field("http_port", &self.http_port)
            .field("rtsp_port", &self.rtsp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("channel", &self.channel)
            .finish()
    }
}

impl DahuaConfig {
    /// Create a config with the default ports on channel 1.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            http_port: HTTP_PORT,
            rtsp_port: RTSP_PORT,
            username: username.into(),
            password: password.into(),
            channel: CHANNEL,
        }
    }

    /// The RTSP url of the main stream, credentials included.
    pub fn rtsp_url(&self) -> String {
        format!(
            "rtsp://{}:{}@{}:{}/cam/realmonitor?channel={}&subtype=0",
            self.username, self.password, self.host, self.rtsp_port, self.channel
        )
    }

    /// The RTSP url of the main stream without credentials, for logs.
    pub fn rtsp_display(&self) -> String {
        format!(
            "rtsp://{}:{}/cam/realmonitor?channel={}&subtype=0",
            self.host, self.rtsp_port, self.channel
        )
    }
}

/// Focus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Focus closer to the camera.
    Near,
    /// Focus further away.
    Far,
}

impl Focus {
    fn code(self) -> &'static str {
        match self {
            Focus::Near => "FocusNear",
            Focus::Far => "FocusFar",
        }
    }
}

/// Continuous motions are started and then stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    /// Start the motion.
    Start,
    /// Stop the motion.
    Stop,
}

impl MotionAction {
    fn as_str(self) -> &'static str {
        match self {
            MotionAction::Start => "start",
            MotionAction::Stop => "stop",
        }
    }
}

/// Round an angle to one decimal for a command, never printing `-0.0`.
pub fn format_angle(degrees: f64) -> String {
    let rounded = (degrees * 10.0).round() / 10.0 + 0.0;
    format!("{rounded:.1}")
}

/// Builder of the CGI request urls of one camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DahuaCgi {
    base: String,
    channel: u32,
}

impl DahuaCgi {
    /// Create the url builder for a camera.
    pub fn new(config: &DahuaConfig) -> Self {
        Self {
            base: format!("http://{}:{}/cgi-bin", config.host, config.http_port),
            channel: config.channel,
        }
    }

    /// The absolute move request.
    ///
    /// `arg1` is the horizontal angle, `arg2` the vertical angle and `arg3` the zoom multiple.
    /// A pan that rounds up to 360 is sent as 0.
    pub fn position_abs_url(&self, orientation: &OrientationAngles, zoom: u16) -> String {
        let pan = format_angle(orientation.pan);
        let pan = if pan == "360.0" { format_angle(0.0) } else { pan };
        format!(
            "{}/ptz.cgi?action=start&channel={}&code=PositionABS&arg1={}&arg2={}&arg3={}",
            self.base,
            self.channel,
            pan,
            format_angle(orientation.tilt),
            zoom
        )
    }

    /// The focus start or stop request.
    pub fn focus_url(&self, focus: Focus, action: MotionAction, multiple: u16) -> String {
        format!(
            "{}/ptz.cgi?action={}&channel={}&code={}&arg1=0&arg2={}&arg3=0",
            self.base,
            action.as_str(),
            self.channel,
            focus.code(),
            multiple
        )
    }

    /// The encoder configuration query.
    pub fn encode_config_url(&self) -> String {
        format!("{}/configManager.cgi?action=getConfig&name=Encode", self.base)
    }

    /// The device type query.
    pub fn device_type_url(&self) -> String {
        format!("{}/magicBox.cgi?action=getDeviceType", self.base)
    }

    /// The main stream option key of the encoder configuration.
    pub fn main_video_key(&self, option: &str) -> String {
        format!(
            "table.Encode[{}].MainFormat[0].Video.{option}",
            self.channel.saturating_sub(1)
        )
    }
}

/// Check that a command was acknowledged with `OK`.
pub fn check_ok(body: &str) -> Result<(), DeviceError> {
    let body = body.trim();
    if body == "OK" {
        Ok(())
    } else {
        Err(DeviceError::Rejected(body.to_string()))
    }
}

/// Find the value of `key` in a `key=value` per line answer.
pub fn find_option<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    body.split(['\n', '\r', '\t'])
        .filter(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .map(str::trim)
}

/// Find and parse an integer option.
pub fn parse_numeric_option(body: &str, key: &str) -> Result<i64, DeviceError> {
    let value = find_option(body, key).ok_or_else(|| DeviceError::MissingOption(key.to_string()))?;
    value.parse().map_err(|_| DeviceError::InvalidOptionValue {
        option: key.to_string(),
        value: value.to_string(),
    })
}
