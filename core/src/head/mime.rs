//! Canonical media types usable as `Accept` / `Content-Type` values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::head::header::HeaderValue;

/// A closed set of media types with their canonical wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Any,
    TextPlain,
    TextHtml,
    TextCss,
    TextJavascript,
    TextXml,
    ApplicationJson,
    ApplicationXml,
    ApplicationJavascript,
    ApplicationPdf,
    ApplicationZip,
    ApplicationOctetStream,
    ApplicationFormUrlencoded,
    ImageJpeg,
    ImagePng,
    ImageGif,
    ImageSvgXml,
    ImageBmp,
    ImageWebp,
    AudioMpeg,
    AudioOgg,
    AudioWav,
    AudioWebm,
    AudioAac,
    VideoMp4,
    VideoMpeg,
    VideoOgg,
    VideoWebm,
    VideoMsvideo,
    MultipartFormData,
    MultipartByteranges,
    MultipartAlternative,
    MultipartMixed,
    MultipartRelated,
    MessageHttp,
    MessageImdnXml,
    MessagePartial,
    MessageRfc822,
    FontWoff,
    FontWoff2,
    FontTtf,
    FontOtf,
}

impl MimeType {
    pub const ALL: [MimeType; 42] = [
        MimeType::Any,
        MimeType::TextPlain,
        MimeType::TextHtml,
        MimeType::TextCss,
        MimeType::TextJavascript,
        MimeType::TextXml,
        MimeType::ApplicationJson,
        MimeType::ApplicationXml,
        MimeType::ApplicationJavascript,
        MimeType::ApplicationPdf,
        MimeType::ApplicationZip,
        MimeType::ApplicationOctetStream,
        MimeType::ApplicationFormUrlencoded,
        MimeType::ImageJpeg,
        MimeType::ImagePng,
        MimeType::ImageGif,
        MimeType::ImageSvgXml,
        MimeType::ImageBmp,
        MimeType::ImageWebp,
        MimeType::AudioMpeg,
        MimeType::AudioOgg,
        MimeType::AudioWav,
        MimeType::AudioWebm,
        MimeType::AudioAac,
        MimeType::VideoMp4,
        MimeType::VideoMpeg,
        MimeType::VideoOgg,
        MimeType::VideoWebm,
        MimeType::VideoMsvideo,
        MimeType::MultipartFormData,
        MimeType::MultipartByteranges,
        MimeType::MultipartAlternative,
        MimeType::MultipartMixed,
        MimeType::MultipartRelated,
        MimeType::MessageHttp,
        MimeType::MessageImdnXml,
        MimeType::MessagePartial,
        MimeType::MessageRfc822,
        MimeType::FontWoff,
        MimeType::FontWoff2,
        MimeType::FontTtf,
        MimeType::FontOtf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Any => "*/*",
            MimeType::TextPlain => "text/plain",
            MimeType::TextHtml => "text/html",
            MimeType::TextCss => "text/css",
            MimeType::TextJavascript => "text/javascript",
            MimeType::TextXml => "text/xml",
            MimeType::ApplicationJson => "application/json",
            MimeType::ApplicationXml => "application/xml",
            MimeType::ApplicationJavascript => "application/javascript",
            MimeType::ApplicationPdf => "application/pdf",
            MimeType::ApplicationZip => "application/zip",
            MimeType::ApplicationOctetStream => "application/octet-stream",
            MimeType::ApplicationFormUrlencoded => "application/x-www-form-urlencoded",
            MimeType::ImageJpeg => "image/jpeg",
            MimeType::ImagePng => "image/png",
            MimeType::ImageGif => "image/gif",
            MimeType::ImageSvgXml => "image/svg+xml",
            MimeType::ImageBmp => "image/bmp",
            MimeType::ImageWebp => "image/webp",
            MimeType::AudioMpeg => "audio/mpeg",
            MimeType::AudioOgg => "audio/ogg",
            MimeType::AudioWav => "audio/wav",
            MimeType::AudioWebm => "audio/webm",
            MimeType::AudioAac => "audio/aac",
            MimeType::VideoMp4 => "video/mp4",
            MimeType::VideoMpeg => "video/mpeg",
            MimeType::VideoOgg => "video/ogg",
            MimeType::VideoWebm => "video/webm",
            MimeType::VideoMsvideo => "video/x-msvideo",
            MimeType::MultipartFormData => "multipart/form-data",
            MimeType::MultipartByteranges => "multipart/byteranges",
            MimeType::MultipartAlternative => "multipart/alternative",
            MimeType::MultipartMixed => "multipart/mixed",
            MimeType::MultipartRelated => "multipart/related",
            MimeType::MessageHttp => "message/http",
            MimeType::MessageImdnXml => "message/imdn+xml",
            MimeType::MessagePartial => "message/partial",
            MimeType::MessageRfc822 => "message/rfc822",
            MimeType::FontWoff => "font/woff",
            MimeType::FontWoff2 => "font/woff2",
            MimeType::FontTtf => "font/ttf",
            MimeType::FontOtf => "font/otf",
        }
    }

    /// The top-level type, e.g. `image` for `image/png`.
    pub fn top_level(&self) -> &'static str {
        let s = self.as_str();
        s.split_once('/').map_or(s, |(top, _)| top)
    }
}

impl HeaderValue for MimeType {
    fn header_value(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media type: {0}")]
pub struct UnknownMimeType(pub String);

impl FromStr for MimeType {
    type Err = UnknownMimeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MimeType::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMimeType(s.to_string()))
    }
}
