use std::io::{Cursor, Write};

use base64::Engine;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::error::Result;

/// File name of the `index`-th (zero based) image in a batch archive
pub fn batch_file_name(index: usize) -> String {
    format!("qrcode-{}.png", index + 1)
}

/// Pack PNG images into an in-memory ZIP, named `qrcode-1.png`, `qrcode-2.png`, ...
pub fn zip_pngs(images: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (index, png) in images.iter().enumerate() {
            zip.start_file(batch_file_name(index), options)?;
            zip.write_all(png)?;
        }

        zip.finish()?;
    }

    Ok(buf.into_inner())
}

/// `data:` URL embedding a PNG
pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_zip_contains_numbered_files() {
        let images = vec![vec![1u8, 2, 3], vec![4u8, 5]];
        let archive = zip_pngs(&images).unwrap();

        let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.len(), 2);

        let mut second = Vec::new();
        zip.by_name("qrcode-2.png")
            .unwrap()
            .read_to_end(&mut second)
            .unwrap();
        assert_eq!(second, vec![4u8, 5]);
    }

    #[test]
    fn test_png_data_url() {
        assert_eq!(png_data_url(b"abc"), "data:image/png;base64,YWJj");
    }
}
