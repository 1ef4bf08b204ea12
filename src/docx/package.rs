use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::assets::{ImageAssets, MEDIA_PREFIX};
use crate::error::Error;

const CONTENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// An opened DOCX archive.
pub(crate) struct DocxPackage<R> {
    zip: ZipArchive<R>,
}

impl DocxPackage<std::fs::File> {
    pub(crate) fn open(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
            ),
            _ => Error::Io(e),
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> DocxPackage<R> {
    pub(crate) fn new(reader: R) -> Result<Self, Error> {
        let zip = ZipArchive::new(reader)
            .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
        Ok(Self { zip })
    }

    /// Raw bytes of `word/document.xml`.
    pub(crate) fn content_part(&mut self) -> Result<Vec<u8>, Error> {
        let mut entry = self.zip.by_name(CONTENT_PART).map_err(|e| match e {
            ZipError::FileNotFound => Error::MissingContentPart,
            other => Error::InvalidDocx(format!("cannot open {CONTENT_PART}: {other}")),
        })?;
        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(|e| Error::InvalidDocx(format!("cannot read {CONTENT_PART}: {e}")))?;
        Ok(data)
    }

    /// Copy every `word/media/*` entry into a fresh temp directory.
    ///
    /// Media relationships from the main part are registered as
    /// `word/media/<rId>` aliases so drawings resolve by embed identifier.
    pub(crate) fn extract_media(&mut self) -> Result<ImageAssets, Error> {
        let dir = tempfile::Builder::new()
            .prefix("docx_images")
            .tempdir()
            .map_err(|source| Error::AssetExtraction {
                name: "temporary directory".into(),
                source,
            })?;
        let dir_path = dir.path().to_path_buf();
        let mut assets = ImageAssets::with_dir(dir);

        for i in 0..self.zip.len() {
            let mut entry = self.zip.by_index(i).map_err(|e| Error::AssetExtraction {
                name: format!("entry #{i}"),
                source: std::io::Error::other(e),
            })?;
            let name = entry.name().to_string();
            if !name.starts_with(MEDIA_PREFIX) || entry.is_dir() {
                continue;
            }
            let Some(base) = entry
                .enclosed_name()
                .and_then(|p| p.file_name().map(|f| f.to_os_string()))
            else {
                log::warn!("Skipping media entry with unsafe name: {name}");
                continue;
            };

            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|source| Error::AssetExtraction {
                    name: name.clone(),
                    source,
                })?;

            let mut target = dir_path.join(&base);
            if target.exists() {
                target = dir_path.join(format!("{i}_{}", base.to_string_lossy()));
            }
            std::fs::write(&target, &data).map_err(|source| Error::AssetExtraction {
                name: name.clone(),
                source,
            })?;
            log::debug!("extracted {name} ({} bytes)", data.len());
            assets.insert(name, target);
        }

        let mut aliased = 0usize;
        for rel in parse_relationships(&mut self.zip) {
            if rel.external {
                continue;
            }
            let zip_path = rel
                .target
                .strip_prefix('/')
                .map(String::from)
                .unwrap_or_else(|| format!("word/{}", rel.target));
            let Some(path) = assets.get(&zip_path).map(Path::to_path_buf) else {
                continue;
            };
            if assets.insert_alias(format!("{MEDIA_PREFIX}{}", rel.id), path) {
                aliased += 1;
            }
        }
        log::debug!("media: {} entries, {aliased} relationship aliases", assets.len() - aliased);

        Ok(assets)
    }
}

struct Relationship {
    id: String,
    target: String,
    external: bool,
}

fn read_zip_text<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Option<String> {
    let mut s = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut s).ok()?;
    Some(s)
}

fn parse_rels_xml(xml_content: &str) -> Vec<Relationship> {
    let Ok(xml) = roxmltree::Document::parse(xml_content) else {
        log::warn!("Ignoring malformed {DOCUMENT_RELS}");
        return Vec::new();
    };
    xml.root_element()
        .children()
        .filter(|n| n.tag_name().name() == "Relationship")
        .filter_map(|n| {
            Some(Relationship {
                id: n.attribute("Id")?.to_string(),
                target: n.attribute("Target")?.to_string(),
                external: n.attribute("TargetMode") == Some("External"),
            })
        })
        .collect()
}

fn parse_relationships<R: Read + Seek>(zip: &mut ZipArchive<R>) -> Vec<Relationship> {
    let Some(xml_content) = read_zip_text(zip, DOCUMENT_RELS) else {
        return Vec::new();
    };
    parse_rels_xml(&xml_content)
}
