//! Loading audio files from disk into staged files.

use std::{fs, io, path::Path};

use shared::domain::StagedFile;

pub fn guess_mime(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first_raw().map(str::to_string)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_staged_file(path: &Path, mime_type: Option<String>) -> io::Result<StagedFile> {
    let bytes = fs::read(path)?;
    let mime_type = mime_type.or_else(|| guess_mime(path));
    Ok(StagedFile::from_parts(display_name(path), mime_type, bytes))
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn reads_file_with_guessed_mime() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("desktop_gui_media_test_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("owl.mp3");
        fs::write(&path, [0_u8; 2048]).expect("write");

        let file = read_staged_file(&path, None).expect("read");

        assert_eq!(file.name, "owl.mp3");
        assert_eq!(file.size_bytes, 2048);
        assert_eq!(file.mime_type.as_deref(), Some("audio/mpeg"));
        assert!(file.validate().is_ok());

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn guesses_audio_mime_from_extension() {
        let mime = guess_mime(Path::new("clip.ogg")).expect("known extension");
        assert!(mime.starts_with("audio/"), "{mime}");
        assert_eq!(guess_mime(Path::new("clip")), None);
        assert_eq!(display_name(Path::new("/tmp/x/clip.ogg")), "clip.ogg");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_staged_file(Path::new("/definitely/not/here.wav"), None)
            .expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
