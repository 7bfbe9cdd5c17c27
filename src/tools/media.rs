//! FFmpeg command builder and video platform detection.
//!
//! Both only produce text. No process is spawned and nothing is downloaded.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::params;
use crate::Request;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FfmpegParams {
    #[serde(deserialize_with = "params::text")]
    pub input_file: String,
    #[serde(deserialize_with = "params::text")]
    pub output_file: String,
    #[serde(deserialize_with = "params::text")]
    pub operation: String,
    /// Passed to `scale=` verbatim, so `-1` and `iw/2` work.
    #[serde(deserialize_with = "params::text")]
    pub width: String,
    #[serde(deserialize_with = "params::text")]
    pub height: String,
    #[serde(deserialize_with = "params::text")]
    pub bitrate: String,
    #[serde(deserialize_with = "params::text")]
    pub audio_codec: String,
    #[serde(deserialize_with = "params::text")]
    pub video_codec: String,
    #[serde(deserialize_with = "params::text")]
    pub start_time: String,
    #[serde(deserialize_with = "params::text")]
    pub duration: String,
}

impl Default for FfmpegParams {
    fn default() -> Self {
        Self {
            input_file: "input.mp4".into(),
            output_file: "output.mp4".into(),
            operation: "convert".into(),
            width: "1920".into(),
            height: "1080".into(),
            bitrate: "1000k".into(),
            audio_codec: "aac".into(),
            video_codec: "libx264".into(),
            start_time: "00:00:00".into(),
            duration: "00:01:00".into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FfmpegCommands {
    pub commands: Vec<String>,
    pub operation: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    #[serde(deserialize_with = "params::text")]
    pub url: String,
    #[serde(deserialize_with = "params::text")]
    pub platform: String,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self { url: String::new(), platform: "auto".into() }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoRequest {
    pub message: String,
    pub url: String,
    pub platform: String,
    pub note: &'static str,
}

/// Host fragments that identify a streaming platform, checked in order.
const PLATFORMS: [(&str, &str); 4] = [
    ("afreecatv.com", "afreeca"),
    ("tv.kakao.com", "kakao"),
    ("tv.naver.com", "naver"),
    ("twitch.tv", "twitch"),
];

const VIDEO_NOTE: &str =
    "Nothing was downloaded. Pass the URL to a downloader such as yt-dlp to fetch the video.";

pub async fn generate_ffmpeg(req: Request) -> Result<FfmpegCommands, ToolError> {
    let p: FfmpegParams = req.json()?;
    Ok(FfmpegCommands {
        commands: ffmpeg_command(&p).into_iter().collect(),
        description: format!("FFmpeg command generated for the {} operation", p.operation),
        operation: p.operation,
    })
}

pub async fn download_video(req: Request) -> Result<VideoRequest, ToolError> {
    let p: VideoParams = req.json()?;
    if p.url.trim().is_empty() {
        return Err(ToolError::validation("URL is required"));
    }
    let platform = detect_platform(&p.url).map_or(p.platform, str::to_owned);
    Ok(VideoRequest {
        message: format!("Video request accepted for the {platform} platform"),
        url: p.url,
        platform,
        note: VIDEO_NOTE,
    })
}

/// The command line for `p.operation`, or `None` for an unknown operation.
pub fn ffmpeg_command(p: &FfmpegParams) -> Option<String> {
    let (input, output) = (&p.input_file, &p.output_file);
    let cmd = match p.operation.as_str() {
        "convert" => format!(
            r#"ffmpeg -i "{input}" -c:v {} -c:a {} "{output}""#,
            p.video_codec, p.audio_codec
        ),
        "resize" => format!(
            r#"ffmpeg -i "{input}" -vf scale={}:{} -c:a copy "{output}""#,
            p.width, p.height
        ),
        "compress" => format!(
            r#"ffmpeg -i "{input}" -c:v {} -b:v {} -c:a {} "{output}""#,
            p.video_codec, p.bitrate, p.audio_codec
        ),
        "extract_audio" => format!(
            r#"ffmpeg -i "{input}" -vn -acodec {} "{}""#,
            p.audio_codec,
            output.replace(".mp4", ".mp3")
        ),
        "cut" => format!(
            r#"ffmpeg -i "{input}" -ss {} -t {} -c copy "{output}""#,
            p.start_time, p.duration
        ),
        _ => return None,
    };
    Some(cmd)
}

pub fn detect_platform(url: &str) -> Option<&'static str> {
    PLATFORMS
        .iter()
        .find(|(host, _)| url.contains(host))
        .map(|&(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operation: &str) -> FfmpegParams {
        FfmpegParams { operation: operation.into(), ..Default::default() }
    }

    #[test]
    fn builds_each_operation() {
        assert_eq!(
            ffmpeg_command(&op("convert")).unwrap(),
            r#"ffmpeg -i "input.mp4" -c:v libx264 -c:a aac "output.mp4""#
        );
        assert_eq!(
            ffmpeg_command(&op("resize")).unwrap(),
            r#"ffmpeg -i "input.mp4" -vf scale=1920:1080 -c:a copy "output.mp4""#
        );
        assert_eq!(
            ffmpeg_command(&op("compress")).unwrap(),
            r#"ffmpeg -i "input.mp4" -c:v libx264 -b:v 1000k -c:a aac "output.mp4""#
        );
        assert_eq!(
            ffmpeg_command(&op("extract_audio")).unwrap(),
            r#"ffmpeg -i "input.mp4" -vn -acodec aac "output.mp3""#
        );
        assert_eq!(
            ffmpeg_command(&op("cut")).unwrap(),
            r#"ffmpeg -i "input.mp4" -ss 00:00:00 -t 00:01:00 -c copy "output.mp4""#
        );
    }

    #[test]
    fn resize_keeps_scale_expressions() {
        let p = FfmpegParams {
            operation: "resize".into(),
            width: "-1".into(),
            height: "720".into(),
            ..Default::default()
        };
        assert_eq!(
            ffmpeg_command(&p).unwrap(),
            r#"ffmpeg -i "input.mp4" -vf scale=-1:720 -c:a copy "output.mp4""#
        );

        let p = FfmpegParams { width: "iw/2".into(), height: "ih/2".into(), ..p };
        assert_eq!(
            ffmpeg_command(&p).unwrap(),
            r#"ffmpeg -i "input.mp4" -vf scale=iw/2:ih/2 -c:a copy "output.mp4""#
        );
    }

    #[test]
    fn unknown_operation_has_no_command() {
        assert_eq!(ffmpeg_command(&op("transcode-to-gif")), None);
    }

    #[test]
    fn extract_audio_replaces_every_mp4() {
        let p = FfmpegParams {
            operation: "extract_audio".into(),
            output_file: "clip.mp4.mp4".into(),
            audio_codec: "libmp3lame".into(),
            ..Default::default()
        };
        assert_eq!(
            ffmpeg_command(&p).unwrap(),
            r#"ffmpeg -i "input.mp4" -vn -acodec libmp3lame "clip.mp3.mp3""#
        );
    }

    #[test]
    fn detects_known_platforms() {
        assert_eq!(detect_platform("https://play.afreecatv.com/x/1"), Some("afreeca"));
        assert_eq!(detect_platform("https://tv.kakao.com/v/1"), Some("kakao"));
        assert_eq!(detect_platform("https://tv.naver.com/v/1"), Some("naver"));
        assert_eq!(detect_platform("https://www.twitch.tv/videos/1"), Some("twitch"));
        assert_eq!(detect_platform("https://example.com/v.mp4"), None);
    }
}
