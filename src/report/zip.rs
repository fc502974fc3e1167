use anyhow::{Context, Result, anyhow};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn report_dir_name(sample_name: &str) -> String {
    format!("{}_seqstats", sample_name)
}

pub fn write_zip(out_dir: &Path, sample_name: &str, files: &[(&str, &[u8])]) -> Result<PathBuf> {
    let root = report_dir_name(sample_name);
    let zip_path = out_dir.join(format!("{}.zip", root));
    let tmp_path = zip_path.with_extension("zip.tmp");

    let file = File::create(&tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let packed = pack(&mut zip, &root, files)
        .and_then(|_| zip.finish().map(|_| ()).context("failed to finalize zip"));
    if let Err(e) = packed {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, &zip_path)
        .with_context(|| format!("failed to move zip to {}", zip_path.display()))?;
    Ok(zip_path)
}

fn pack(zip: &mut ZipWriter<File>, root: &str, files: &[(&str, &[u8])]) -> Result<()> {
    // Fixed timestamp keeps archives byte-identical across runs.
    let mtime = zip::DateTime::from_date_and_time(1980, 1, 1, 0, 0, 0)
        .map_err(|_| anyhow!("invalid zip timestamp"))?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(mtime);

    zip.add_directory(format!("{}/", root), options)
        .context("failed to add directory entry to zip")?;
    for (name, contents) in files {
        zip.start_file(format!("{}/{}", root, name), options)
            .with_context(|| format!("failed to add {} to zip", name))?;
        zip.write_all(contents)?;
    }
    Ok(())
}
