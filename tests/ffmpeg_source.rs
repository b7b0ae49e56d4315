#![cfg(all(unix, feature = "image-io"))]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use sentinel::source::{self, FfmpegSource};
use sentinel::{FrameSource, SentinelError};

// Writing a script and executing it must not race a fork from another test.
static SPAWN: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SPAWN.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sentinel-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes an executable shell script named `ffmpeg` into `dir`.
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn rejected_input_fails_at_open() {
    let _guard = serial();
    let dir = scratch_dir("ffmpeg-path");
    fake_ffmpeg(&dir, "echo 'No such file or directory' >&2\nexit 1");

    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut search = vec![dir.clone()];
    search.extend(std::env::split_paths(&path));
    std::env::set_var("PATH", std::env::join_paths(search).unwrap());

    let result = source::open("/nonexistent/clip.mp4");
    std::env::set_var("PATH", path);
    std::fs::remove_dir_all(&dir).ok();

    let err = result.err().unwrap();
    assert!(matches!(err, SentinelError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("clip.mp4"));
}

#[test]
fn first_frame_is_held_for_the_first_read() {
    let _guard = serial();
    let dir = scratch_dir("ffmpeg-ok");
    let program = fake_ffmpeg(
        &dir,
        r"printf 'P6\n2 1\n255\n\377\000\000\000\000\377'
printf 'P6\n2 1\n255\n\001\002\003\004\005\006'",
    );

    let mut frames = FfmpegSource::spawn_program(&program, "clip.mp4").unwrap();
    let first = frames.read().unwrap().unwrap();
    let second = frames.read().unwrap().unwrap();
    let end = frames.read().unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!((first.index, second.index), (0, 1));
    assert_eq!(first.image.data(), &[255, 0, 0, 0, 0, 255]);
    assert_eq!(second.image.data(), &[1, 2, 3, 4, 5, 6]);
    assert!(end.is_none());
}

#[test]
fn empty_successful_output_is_an_empty_stream() {
    let _guard = serial();
    let dir = scratch_dir("ffmpeg-empty");
    let program = fake_ffmpeg(&dir, "exit 0");
    let mut frames = FfmpegSource::spawn_program(&program, "clip.mp4").unwrap();
    let end = frames.read().unwrap();
    std::fs::remove_dir_all(&dir).ok();
    assert!(end.is_none());
}
