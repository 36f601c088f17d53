use anyhow::{Context, Result};
use id3::frame::{Content, Picture, PictureType};
use id3::{Frame, Tag, TagLike, Version};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

const MAX_COVER_DIM: u32 = 500;
const MAX_COVER_BYTES: usize = 300 * 1024;

/// Tags to embed into one encoded track.
pub struct TrackTags<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub cover: Option<&'a Path>,
}

/// Fetch a cover image over HTTP and write the body verbatim to `dest`.
pub fn fetch_cover(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("fetching cover {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching cover {url}"))?;
    let bytes = response.bytes().context("reading cover response body")?;
    std::fs::write(dest, &bytes)
        .with_context(|| format!("writing cover to {}", dest.display()))?;
    Ok(())
}

/// Write ID3v2.3 tags, embedding the cover as front art when present.
pub fn write_tags(file: &Path, tags: &TrackTags) -> Result<()> {
    let mut tag = Tag::new();
    tag.set_title(tags.title);
    tag.set_artist(tags.artist);
    tag.set_album(tags.album);

    if let Some(cover) = tags.cover {
        let data = cover_jpeg(cover)
            .with_context(|| format!("preparing cover {}", cover.display()))?;
        let picture = Picture {
            mime_type: "image/jpeg".to_string(),
            picture_type: PictureType::CoverFront,
            description: "cover".to_string(),
            data,
        };
        tag.add_frame(Frame::with_content("APIC", Content::Picture(picture)));
    }

    tag.write_to_path(file, Version::Id3v23)
        .with_context(|| format!("writing ID3 tag to {}", file.display()))?;

    Ok(())
}

/// Decode a cover, cap it at `MAX_COVER_DIM`, and re-encode it as JPEG,
/// stepping the quality down until it fits in `MAX_COVER_BYTES`.
fn cover_jpeg(cover: &Path) -> Result<Vec<u8>> {
    let img = ImageReader::open(cover)?
        .with_guessed_format()?
        .decode()?;

    let (w, h) = img.dimensions();
    let resized = if w.max(h) > MAX_COVER_DIM {
        img.resize(MAX_COVER_DIM, MAX_COVER_DIM, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb = resized.to_rgb8();

    let mut quality = 85;
    loop {
        let mut buf: Vec<u8> = Vec::new();
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut buf), quality).encode_image(&rgb)?;
        if buf.len() <= MAX_COVER_BYTES || quality <= 30 {
            return Ok(buf);
        }
        quality -= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn cover_is_resized_and_bounded() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("cover.png");
        write_png(&src, 1200, 900);

        let data = cover_jpeg(&src).unwrap();
        assert!(data.len() <= MAX_COVER_BYTES);

        let decoded = image::load_from_memory(&data).unwrap();
        let (w, h) = decoded.dimensions();
        assert!(w <= MAX_COVER_DIM && h <= MAX_COVER_DIM);
    }

    #[test]
    fn small_cover_keeps_its_dimensions() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("cover.png");
        write_png(&src, 120, 90);

        let data = cover_jpeg(&src).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.dimensions(), (120, 90));
    }
}
