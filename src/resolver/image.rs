use anyhow::{bail, Context, Result};
use imagesize::ImageType;
use reqwest::blocking::Client;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use tracing::{debug, instrument, trace};

use super::{build_client, ImageProbe, ResolverConfig};

/// Image formats recognized by their leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Gif,
    Jpeg,
    Bmp,
    Webp,
    Tiff,
    Ico,
    Other, // any other format imagesize knows (avif, heif, psd...)
}

impl From<ImageType> for ImageFormat {
    fn from(kind: ImageType) -> Self {
        match kind {
            ImageType::Png => ImageFormat::Png,
            ImageType::Gif => ImageFormat::Gif,
            ImageType::Jpeg => ImageFormat::Jpeg,
            ImageType::Bmp => ImageFormat::Bmp,
            ImageType::Webp => ImageFormat::Webp,
            ImageType::Tiff => ImageFormat::Tiff,
            ImageType::Ico => ImageFormat::Ico,
            _ => ImageFormat::Other,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Ico => "ico",
            ImageFormat::Other => "other",
        };
        f.write_str(name)
    }
}

/// What the probe learned about an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub dimensions: Option<(u32, u32)>, // (width, height) when the header carries them
}

/// Identifies image data from its first bytes
///
/// Returns `None` when `imagesize` does not recognize the data. Dimensions are
/// filled in when the bytes available are enough to read them.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageInfo> {
    let format = ImageFormat::from(imagesize::image_type(bytes).ok()?);
    let dimensions = imagesize::blob_size(bytes).ok().and_then(|size| {
        Some((u32::try_from(size.width).ok()?, u32::try_from(size.height).ok()?))
    });

    trace!("Sniffed {} image, dimensions {:?}", format, dimensions);
    Some(ImageInfo { format, dimensions })
}

/// Downloads the start of a resource and sniffs it for image data
///
/// Redirects are followed, so shortened links to images are recognized.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: Client,
    max_probe_bytes: usize,
}

impl HttpImageProbe {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = build_client(config, reqwest::redirect::Policy::limited(config.max_hops))?;
        Ok(Self {
            client,
            max_probe_bytes: config.max_probe_bytes,
        })
    }
}

impl ImageProbe for HttpImageProbe {
    #[instrument(level = "debug", skip(self))]
    fn probe(&self, url: &str) -> Result<Option<ImageInfo>> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Fetching {} answered with status {}", url, status);
        }

        let mut head = Vec::with_capacity(self.max_probe_bytes.min(8 * 1024));
        resp.take(self.max_probe_bytes as u64)
            .read_to_end(&mut head)
            .with_context(|| format!("Failed to read response body from {}", url))?;

        debug!("Read {} bytes from {}", head.len(), url);
        Ok(sniff_image(&head))
    }
}
