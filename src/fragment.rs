//! Generated HTML fragment with suggested replacement image paths.
//!
//! After transcoding, the pipeline writes a fragment listing one `<img>` tag
//! per optimized asset, ready to paste over the site's existing markup. The
//! markup is generated with Maud from the actual scanned inventory, so the
//! suggestions always match what is on disk.
//!
//! Per-category attributes:
//! - Logo and invitation render above the fold → `loading="eager"`
//! - Timeline/gallery photos → `loading="lazy"` plus `sizes`/`srcset`
//! - Everything else → `loading="lazy"`

use crate::scan::{Category, ImageAsset};
use maud::{html, Markup, PreEscaped};
use std::io;
use std::path::Path;

/// Responsive `sizes` attribute for gallery-style images.
const GALLERY_SIZES: &str = "(max-width: 768px) 100vw, (max-width: 1024px) 50vw, 33vw";

fn srcset_for(src: &str) -> String {
    format!("{src} 300w, {src} 600w, {src} 900w")
}

fn image_tag(asset: &ImageAsset, output_prefix: &str) -> Markup {
    let src = format!("{}/{}", output_prefix.trim_end_matches('/'), asset.file_name);
    let alt = alt_text(asset);
    match asset.category {
        Category::Logo => html! {
            img src=(src) alt=(alt) class="logo-image" loading="eager";
        },
        Category::Invitation => html! {
            img src=(src) alt=(alt) class="invitation-image" loading="eager";
        },
        Category::TimelineGallery => html! {
            img src=(src) alt=(alt) loading="lazy" sizes=(GALLERY_SIZES) srcset=(srcset_for(&src));
        },
        Category::Other => html! {
            img src=(src) alt=(alt) loading="lazy";
        },
    }
}

/// Alt text from the filename stem, dashes and underscores to spaces.
fn alt_text(asset: &ImageAsset) -> String {
    let stem = Path::new(&asset.file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| asset.file_name.clone());
    stem.replace(['-', '_'], " ")
}

/// Render the full fragment for a scanned inventory.
///
/// `output_prefix` is the site-relative path of the optimized directory,
/// e.g. `images/optimized`.
pub fn render_fragment(assets: &[ImageAsset], output_prefix: &str) -> String {
    let section = |category: Category, heading: &'static str| -> Markup {
        let matching: Vec<&ImageAsset> = assets
            .iter()
            .filter(|a| a.category == category)
            .collect();
        html! {
            @if !matching.is_empty() {
                (PreEscaped(format!("<!-- {heading} -->\n")))
                @for asset in &matching {
                    (image_tag(asset, output_prefix))
                    "\n"
                }
            }
        }
    };

    let markup = html! {
        (PreEscaped(
            "<!-- Optimized image paths — replace the existing src attributes with these -->\n"
        ))
        (section(Category::Logo, "Navigation logo"))
        (section(Category::Invitation, "Hero invitation"))
        (section(Category::TimelineGallery, "Timeline and gallery"))
        (section(Category::Other, "Other images"))
    };
    markup.into_string()
}

/// Write the fragment to disk.
pub fn write_fragment(
    path: &Path,
    assets: &[ImageAsset],
    output_prefix: &str,
) -> io::Result<()> {
    std::fs::write(path, render_fragment(assets, output_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Codec;
    use crate::scan::classify;

    fn asset(name: &str) -> ImageAsset {
        ImageAsset {
            file_name: name.to_string(),
            size_bytes: 1024,
            category: classify(name),
            format: Codec::Jpeg,
        }
    }

    #[test]
    fn gallery_images_are_lazy_with_srcset() {
        let assets = vec![asset("EC-244.jpg")];
        let fragment = render_fragment(&assets, "images/optimized");

        assert!(fragment.contains(r#"loading="lazy""#));
        assert!(fragment.contains(r#"src="images/optimized/EC-244.jpg""#));
        assert!(fragment.contains("srcset="));
        assert!(fragment.contains("images/optimized/EC-244.jpg 300w"));
    }

    #[test]
    fn logo_is_eager_with_class() {
        let assets = vec![asset("logo-ec.png")];
        let fragment = render_fragment(&assets, "images/optimized");

        assert!(fragment.contains(r#"loading="eager""#));
        assert!(fragment.contains(r#"class="logo-image""#));
        assert!(!fragment.contains(r#"loading="lazy""#));
    }

    #[test]
    fn invitation_is_eager() {
        let assets = vec![asset("you-are-invited.PNG")];
        let fragment = render_fragment(&assets, "images/optimized");

        assert!(fragment.contains(r#"class="invitation-image""#));
        assert!(fragment.contains(r#"loading="eager""#));
    }

    #[test]
    fn alt_text_from_stem() {
        let assets = vec![asset("venue-map.jpg")];
        let fragment = render_fragment(&assets, "images/optimized");
        assert!(fragment.contains(r#"alt="venue map""#));
    }

    #[test]
    fn empty_categories_emit_no_section() {
        let assets = vec![asset("venue-map.jpg")];
        let fragment = render_fragment(&assets, "images/optimized");
        assert!(fragment.contains("<!-- Other images -->"));
        assert!(!fragment.contains("<!-- Navigation logo -->"));
    }

    #[test]
    fn fragment_writes_to_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("optimized-image-paths.html");
        write_fragment(&path, &[asset("EC-1.jpg")], "images/optimized").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("EC-1.jpg"));
    }
}
