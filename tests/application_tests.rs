//! Application layer tests
//!
//! Tests for the scan, resolve and composite use cases and for the complete
//! pipeline, run against the in-memory directory reader and thumbnail
//! provider.

use directory_thumbnailer::application::dto::ThumbnailRequest;
use directory_thumbnailer::application::{
    Compositor, ExitStatus, Overlay, PickRepresentativeUseCase, ResolveThumbnailUseCase,
    ScanError, ThumbnailDirectoryUseCase, ThumbnailError, ThumbnailerError,
};
use directory_thumbnailer::domain::entities::{
    ChildEntry, DIRECTORY_CONTENT_TYPE, FileKind, FileUri, RecursionBudget, ThumbnailImage,
    ThumbnailSize,
};
use directory_thumbnailer::domain::repositories::{
    OverlayError, OverlayIconSource, ThumbnailWriter, WriteResult, WriterError,
};
use directory_thumbnailer::infrastructure::directory::InMemoryDirectoryReader;
use directory_thumbnailer::infrastructure::thumbnail_cache::InMemoryThumbnailProvider;
use proptest::prelude::*;
use rstest::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const BLUE: [u8; 4] = [0, 0, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn uri(path: &str) -> FileUri {
    FileUri::from_path(Path::new(path)).unwrap()
}

fn text(path: &str) -> ChildEntry {
    ChildEntry::new(path, FileKind::Regular).with_content_type("text/plain")
}

fn jpeg(path: &str) -> ChildEntry {
    ChildEntry::new(path, FileKind::Regular).with_content_type("image/jpeg")
}

fn subdirectory(path: &str) -> ChildEntry {
    ChildEntry::new(path, FileKind::Directory).with_content_type(DIRECTORY_CONTENT_TYPE)
}

fn pick(
    reader: &InMemoryDirectoryReader,
    provider: &InMemoryThumbnailProvider,
    directory: &str,
) -> Result<Option<PathBuf>, ScanError> {
    PickRepresentativeUseCase::default()
        .execute(Path::new(directory), reader, provider)
        .map(|candidate| candidate.map(|c| c.entry().path().to_path_buf()))
}

/// Overlay source drawing a solid square
struct SolidIcon([u8; 4]);

impl OverlayIconSource for SolidIcon {
    fn load_icon(&self, size: u32) -> Result<ThumbnailImage, OverlayError> {
        Ok(ThumbnailImage::filled(size, size, self.0))
    }
}

/// Overlay source without any icon
struct MissingIcon;

impl OverlayIconSource for MissingIcon {
    fn load_icon(&self, _size: u32) -> Result<ThumbnailImage, OverlayError> {
        Err(OverlayError::NotFound {
            name: "folder".to_string(),
        })
    }
}

/// Writer keeping saved images in memory
#[derive(Default)]
struct RecordingWriter {
    saved: Mutex<Vec<(PathBuf, ThumbnailImage)>>,
}

impl RecordingWriter {
    fn last(&self) -> Option<(PathBuf, ThumbnailImage)> {
        self.saved.lock().unwrap().last().cloned()
    }
}

impl ThumbnailWriter for RecordingWriter {
    fn write(&self, image: &ThumbnailImage, path: &Path) -> Result<WriteResult, WriterError> {
        self.saved
            .lock()
            .unwrap()
            .push((path.to_path_buf(), image.clone()));
        Ok(WriteResult {
            saved_path: path.to_path_buf(),
            saved_size: 0,
        })
    }
}

/// Writer that always fails
struct ReadOnlyWriter;

impl ThumbnailWriter for ReadOnlyWriter {
    fn write(&self, _image: &ThumbnailImage, path: &Path) -> Result<WriteResult, WriterError> {
        Err(WriterError::PermissionDenied(path.display().to_string()))
    }
}

// ============================================================================
// PickRepresentativeUseCase Tests
// ============================================================================

#[test]
fn test_first_child_wins_ties() {
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/docs", vec![text("/docs/a.txt"), text("/docs/b.txt")]);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/docs").unwrap(),
        Some(PathBuf::from("/docs/a.txt"))
    );
}

#[test]
fn test_later_better_child_replaces_earlier() {
    let reader = InMemoryDirectoryReader::new().with_directory(
        "/docs",
        vec![subdirectory("/docs/sub"), text("/docs/a.txt")],
    );
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/docs").unwrap(),
        Some(PathBuf::from("/docs/a.txt"))
    );
}

#[test]
fn test_scan_stops_at_maximum_score() {
    let reader = InMemoryDirectoryReader::new().with_directory(
        "/photos",
        vec![jpeg("/photos/b.jpg"), text("/photos/c.txt"), jpeg("/photos/d.jpg")],
    );
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/photos").unwrap(),
        Some(PathBuf::from("/photos/b.jpg"))
    );
    assert_eq!(reader.entries_pulled(), 1);
}

#[test]
fn test_symlink_to_directory_is_never_chosen() {
    let link = ChildEntry::new("/photos/loop", FileKind::SymbolicLink)
        .with_content_type("image/png")
        .with_symlink_target("/photos");
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/photos", vec![link, subdirectory("/photos/sub")])
        .with_target("/photos", FileKind::Directory);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/photos").unwrap(),
        Some(PathBuf::from("/photos/sub"))
    );
}

#[test]
fn test_symlink_to_file_is_scored_like_a_file() {
    let link = ChildEntry::new("/photos/cover", FileKind::SymbolicLink)
        .with_content_type("image/png")
        .with_symlink_target("real.png");
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/photos", vec![text("/photos/a.txt"), link])
        .with_target("/photos/real.png", FileKind::Regular);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/photos").unwrap(),
        Some(PathBuf::from("/photos/cover"))
    );
}

#[test]
fn test_only_directory_symlinks_is_empty() {
    let link = ChildEntry::new("/photos/up", FileKind::SymbolicLink).with_symlink_target("..");
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/photos", vec![link])
        .with_target("/photos/..", FileKind::Directory);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(pick(&reader, &provider, "/photos").unwrap(), None);
}

#[test]
fn test_empty_directory_has_no_candidate() {
    let reader = InMemoryDirectoryReader::new().with_directory("/empty", vec![]);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(pick(&reader, &provider, "/empty").unwrap(), None);
}

#[test]
fn test_read_error_after_candidate_keeps_candidate() {
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/docs", vec![text("/docs/a.txt"), jpeg("/docs/b.jpg")])
        .with_failure_after("/docs", 1);
    let provider = InMemoryThumbnailProvider::new();

    assert_eq!(
        pick(&reader, &provider, "/docs").unwrap(),
        Some(PathBuf::from("/docs/a.txt"))
    );
}

#[test]
fn test_read_error_before_candidate_fails() {
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/docs", vec![text("/docs/a.txt")])
        .with_failure_after("/docs", 0);
    let provider = InMemoryThumbnailProvider::new();

    assert!(matches!(pick(&reader, &provider, "/docs"), Err(ScanError::Read(_))));
}

#[test]
fn test_unreadable_directory_fails() {
    let reader = InMemoryDirectoryReader::new();
    let provider = InMemoryThumbnailProvider::new();

    assert!(matches!(pick(&reader, &provider, "/missing"), Err(ScanError::Read(_))));
}

// ============================================================================
// ResolveThumbnailUseCase Tests
// ============================================================================

#[test]
fn test_cached_thumbnail_is_loaded_without_generating() {
    let target = uri("/photos/b.jpg");
    let provider = InMemoryThumbnailProvider::new()
        .with_cached(&target, ThumbnailImage::filled(8, 8, BLUE))
        .with_generated(&target, ThumbnailImage::filled(1, 1, RED));

    let image = ResolveThumbnailUseCase::new()
        .execute(&target, "image/jpeg", 0, &provider, RecursionBudget::DEFAULT)
        .unwrap();

    assert_eq!(image.dimensions(), (8, 8));
    assert!(provider.generate_calls().is_empty());
}

#[test]
fn test_cached_thumbnail_is_used_even_without_budget() {
    let target = uri("/photos/sub");
    let provider =
        InMemoryThumbnailProvider::new().with_cached(&target, ThumbnailImage::filled(8, 8, BLUE));

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        DIRECTORY_CONTENT_TYPE,
        0,
        &provider,
        RecursionBudget::new(0),
    );

    assert!(result.is_ok());
}

#[test]
fn test_unreadable_cache_entry_is_an_error() {
    let target = uri("/photos/b.jpg");
    let provider = InMemoryThumbnailProvider::new()
        .with_unreadable_cache_entry(&target)
        .with_generated(&target, ThumbnailImage::filled(1, 1, RED));

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        "image/jpeg",
        0,
        &provider,
        RecursionBudget::DEFAULT,
    );

    assert!(matches!(result, Err(ThumbnailError::CacheLoad { .. })));
    assert!(provider.generate_calls().is_empty());
}

#[test]
fn test_known_failure_is_not_retried() {
    let target = uri("/photos/b.jpg");
    let provider = InMemoryThumbnailProvider::new()
        .with_failed(&target)
        .with_generated(&target, ThumbnailImage::filled(1, 1, RED));

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        "image/jpeg",
        0,
        &provider,
        RecursionBudget::DEFAULT,
    );

    assert!(matches!(result, Err(ThumbnailError::KnownFailure { .. })));
    assert!(provider.generate_calls().is_empty());
}

#[test]
fn test_unsupported_type_is_rejected() {
    let target = uri("/docs/a.txt");
    let provider = InMemoryThumbnailProvider::new().with_unsupported_type("text/plain");

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        "text/plain",
        0,
        &provider,
        RecursionBudget::DEFAULT,
    );

    assert!(matches!(
        result,
        Err(ThumbnailError::UnsupportedType { ref mime_type, .. }) if mime_type == "text/plain"
    ));
}

#[test]
fn test_directory_generation_gets_descended_budget() {
    let target = uri("/photos/sub");
    let provider =
        InMemoryThumbnailProvider::new().with_generated(&target, ThumbnailImage::filled(4, 4, RED));

    ResolveThumbnailUseCase::new()
        .execute(&target, DIRECTORY_CONTENT_TYPE, 0, &provider, RecursionBudget::new(3))
        .unwrap();

    let calls = provider.generate_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].uri, target.to_string());
    assert_eq!(calls[0].budget, RecursionBudget::new(2));
}

#[rstest]
#[case(0)]
#[case(3)]
fn test_file_generation_does_not_spend_budget(#[case] remaining: u32) {
    let target = uri("/photos/b.jpg");
    let provider =
        InMemoryThumbnailProvider::new().with_generated(&target, ThumbnailImage::filled(4, 4, RED));

    let image = ResolveThumbnailUseCase::new()
        .execute(&target, "image/jpeg", 0, &provider, RecursionBudget::new(remaining))
        .unwrap();

    assert_eq!(image.dimensions(), (4, 4));
    let calls = provider.generate_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].budget, RecursionBudget::new(remaining));
}

#[test]
fn test_directory_generation_is_refused_without_budget() {
    let target = uri("/photos/sub");
    let provider =
        InMemoryThumbnailProvider::new().with_generated(&target, ThumbnailImage::filled(4, 4, RED));

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        DIRECTORY_CONTENT_TYPE,
        0,
        &provider,
        RecursionBudget::new(0),
    );

    assert!(matches!(result, Err(ThumbnailError::RecursionLimitReached { .. })));
    assert!(provider.generate_calls().is_empty());
}

#[test]
fn test_generation_failure_is_reported() {
    let target = uri("/photos/b.jpg");
    let provider = InMemoryThumbnailProvider::new();

    let result = ResolveThumbnailUseCase::new().execute(
        &target,
        "image/jpeg",
        0,
        &provider,
        RecursionBudget::DEFAULT,
    );

    assert!(matches!(result, Err(ThumbnailError::GenerationFailed { .. })));
}

// ============================================================================
// Compositor Tests
// ============================================================================

#[rstest]
#[case((512, 256), Some(128), (128, 64))]
#[case((256, 512), Some(128), (64, 128))]
#[case((64, 32), Some(128), (64, 32))]
#[case((128, 128), Some(128), (128, 128))]
#[case((300, 200), None, (300, 200))]
fn test_scaling(
    #[case] size: (u32, u32),
    #[case] max_dimension: Option<u32>,
    #[case] expected: (u32, u32),
) {
    let image = ThumbnailImage::filled(size.0, size.1, BLUE);
    let result = Compositor::new().finalize(image, max_dimension, None).unwrap();
    assert_eq!(result.dimensions(), expected);
}

#[test]
fn test_unchanged_image_keeps_pixels() {
    let image = ThumbnailImage::filled(10, 5, BLUE);
    let result = Compositor::new()
        .finalize(image.clone(), Some(100), None)
        .unwrap();
    assert_eq!(result, image);
}

#[test]
fn test_degenerate_scaling_is_an_error() {
    let image = ThumbnailImage::filled(1000, 1, BLUE);
    assert!(Compositor::new().finalize(image, Some(10), None).is_err());
}

#[test]
fn test_overlay_is_drawn_top_left() {
    let icon = SolidIcon(RED);
    let overlay = Overlay {
        source: &icon,
        size: ThumbnailSize::Normal,
    };

    let result = Compositor::new()
        .finalize(ThumbnailImage::filled(128, 128, BLUE), None, Some(overlay))
        .unwrap();
    let pixels = result.pixels();

    assert_eq!(pixels.get_pixel(3, 3).0, BLUE);
    assert_eq!(pixels.get_pixel(4, 4).0, RED);
    assert_eq!(pixels.get_pixel(35, 35).0, RED);
    assert_eq!(pixels.get_pixel(36, 36).0, BLUE);
}

#[test]
fn test_overlay_shrinks_with_thumbnail() {
    let icon = SolidIcon(RED);
    let overlay = Overlay {
        source: &icon,
        size: ThumbnailSize::Normal,
    };

    let result = Compositor::new()
        .finalize(ThumbnailImage::filled(128, 64, BLUE), Some(64), Some(overlay))
        .unwrap();
    let pixels = result.pixels();

    assert_eq!(result.dimensions(), (64, 32));
    assert_eq!(pixels.get_pixel(1, 1).0, BLUE);
    assert_eq!(pixels.get_pixel(2, 2).0, RED);
    assert_eq!(pixels.get_pixel(17, 17).0, RED);
    assert_eq!(pixels.get_pixel(18, 18).0, BLUE);
}

proptest! {
    #[test]
    fn prop_images_are_never_upscaled(
        width in 1u32..400,
        height in 1u32..400,
        max_dimension in 1u32..600,
    ) {
        let image = ThumbnailImage::filled(width, height, BLUE);
        if let Ok(result) = Compositor::new().finalize(image, Some(max_dimension), None) {
            prop_assert!(result.width() <= width);
            prop_assert!(result.height() <= height);
            if width.max(height) > max_dimension {
                prop_assert_eq!(result.max_dimension(), max_dimension);
            }
        }
    }
}

// ============================================================================
// ThumbnailDirectoryUseCase Tests
// ============================================================================

struct Pipeline {
    reader: Arc<InMemoryDirectoryReader>,
    provider: Arc<InMemoryThumbnailProvider>,
    writer: Arc<RecordingWriter>,
    use_case: ThumbnailDirectoryUseCase,
}

fn pipeline(
    reader: InMemoryDirectoryReader,
    provider: InMemoryThumbnailProvider,
    overlay: Arc<dyn OverlayIconSource>,
) -> Pipeline {
    let reader = Arc::new(reader);
    let provider = Arc::new(provider);
    let writer = Arc::new(RecordingWriter::default());
    let use_case =
        ThumbnailDirectoryUseCase::new(reader.clone(), provider.clone(), overlay, writer.clone());

    Pipeline {
        reader,
        provider,
        writer,
        use_case,
    }
}

#[fixture]
fn photos() -> InMemoryDirectoryReader {
    let hidden = text("/photos/.hidden").with_hidden(true);
    InMemoryDirectoryReader::new().with_directory(
        "/photos",
        vec![text("/photos/a.txt"), jpeg("/photos/b.jpg"), hidden],
    )
}

#[rstest]
fn test_pipeline_thumbnails_best_child(photos: InMemoryDirectoryReader) {
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/photos/b.jpg"), ThumbnailImage::filled(512, 256, BLUE));
    let pipeline = pipeline(photos, provider, Arc::new(SolidIcon(RED)));

    let request = ThumbnailRequest::new("/photos", "/out/thumb.png").with_max_dimension(Some(128));
    let result = pipeline.use_case.execute(&request).unwrap();

    assert_eq!(result.saved_path, PathBuf::from("/out/thumb.png"));
    let (path, image) = pipeline.writer.last().unwrap();
    assert_eq!(path, PathBuf::from("/out/thumb.png"));
    assert_eq!(image.dimensions(), (128, 64));
    assert_eq!(image.pixels().get_pixel(4, 4).0, BLUE);

    // b.jpg reaches the maximum score, so .hidden is never read.
    assert_eq!(pipeline.reader.entries_pulled(), 2);
}

#[rstest]
fn test_pipeline_draws_overlay_on_request(photos: InMemoryDirectoryReader) {
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/photos/b.jpg"), ThumbnailImage::filled(512, 256, BLUE));
    let pipeline = pipeline(photos, provider, Arc::new(SolidIcon(RED)));

    let request = ThumbnailRequest::new("/photos", "/out/thumb.png")
        .with_max_dimension(Some(128))
        .with_overlay(true);
    let image = pipeline.use_case.create_thumbnail(&request).unwrap();

    assert_eq!(image.pixels().get_pixel(4, 4).0, RED);
    assert_eq!(image.pixels().get_pixel(3, 3).0, BLUE);
}

#[rstest]
fn test_pipeline_overlay_failure(photos: InMemoryDirectoryReader) {
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/photos/b.jpg"), ThumbnailImage::filled(64, 64, BLUE));
    let pipeline = pipeline(photos, provider, Arc::new(MissingIcon));

    let request = ThumbnailRequest::new("/photos", "/out/thumb.png").with_overlay(true);
    let err = pipeline.use_case.execute(&request).unwrap_err();

    assert!(matches!(err, ThumbnailerError::OverlayLoadFailed(_)));
    assert_eq!(err.exit_status(), ExitStatus::ErrorLoadingOverlay);
    assert!(pipeline.writer.last().is_none());
}

#[test]
fn test_pipeline_empty_directory() {
    let reader = InMemoryDirectoryReader::new().with_directory("/empty", vec![]);
    let pipeline = pipeline(reader, InMemoryThumbnailProvider::new(), Arc::new(MissingIcon));

    let err = pipeline
        .use_case
        .execute(&ThumbnailRequest::new("/empty", "/out/thumb.png"))
        .unwrap_err();

    assert!(matches!(err, ThumbnailerError::EmptyDirectory { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_pipeline_recursion_limit() {
    let reader =
        InMemoryDirectoryReader::new().with_directory("/outer", vec![subdirectory("/outer/inner")]);
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/outer/inner"), ThumbnailImage::filled(16, 16, BLUE));
    let pipeline = pipeline(reader, provider, Arc::new(MissingIcon));

    let request = ThumbnailRequest::new("/outer", "/out/thumb.png")
        .with_recursion_budget(RecursionBudget::new(0));
    let err = pipeline.use_case.execute(&request).unwrap_err();

    assert!(matches!(err, ThumbnailerError::RecursionLimitReached { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(pipeline.provider.generate_calls().is_empty());
}

#[test]
fn test_pipeline_nested_directory_sees_zero_budget() {
    let reader =
        InMemoryDirectoryReader::new().with_directory("/outer", vec![subdirectory("/outer/inner")]);
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/outer/inner"), ThumbnailImage::filled(16, 16, BLUE));
    let pipeline = pipeline(reader, provider, Arc::new(MissingIcon));

    let request = ThumbnailRequest::new("/outer", "/out/thumb.png")
        .with_recursion_budget(RecursionBudget::new(1));
    pipeline.use_case.execute(&request).unwrap();

    let calls = pipeline.provider.generate_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mime_type, DIRECTORY_CONTENT_TYPE);
    assert_eq!(calls[0].budget, RecursionBudget::new(0));
}

#[test]
fn test_pipeline_chosen_child_failure_has_no_fallback() {
    let reader = InMemoryDirectoryReader::new()
        .with_directory("/docs", vec![jpeg("/docs/b.jpg"), text("/docs/a.txt")]);
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/docs/a.txt"), ThumbnailImage::filled(4, 4, BLUE));
    let pipeline = pipeline(reader, provider, Arc::new(MissingIcon));

    let err = pipeline
        .use_case
        .execute(&ThumbnailRequest::new("/docs", "/out/thumb.png"))
        .unwrap_err();

    assert!(matches!(err, ThumbnailerError::GenerationFailed { .. }));
    assert_eq!(pipeline.provider.generate_calls().len(), 1);
}

#[rstest]
fn test_pipeline_save_failure(photos: InMemoryDirectoryReader) {
    let provider = InMemoryThumbnailProvider::new()
        .with_generated(&uri("/photos/b.jpg"), ThumbnailImage::filled(8, 8, BLUE));
    let use_case = ThumbnailDirectoryUseCase::new(
        Arc::new(photos),
        Arc::new(provider),
        Arc::new(MissingIcon),
        Arc::new(ReadOnlyWriter),
    );

    let err = use_case
        .execute(&ThumbnailRequest::new("/photos", "/readonly/thumb.png"))
        .unwrap_err();

    assert!(err.is_save_error());
    assert_eq!(err.exit_status(), ExitStatus::ErrorSavingThumbnail);
}

#[test]
fn test_pipeline_scan_failure() {
    let pipeline = pipeline(
        InMemoryDirectoryReader::new(),
        InMemoryThumbnailProvider::new(),
        Arc::new(MissingIcon),
    );

    let err = pipeline
        .use_case
        .execute(&ThumbnailRequest::new("/missing", "/out/thumb.png"))
        .unwrap_err();

    assert!(matches!(err, ThumbnailerError::ScanFailed { .. }));
    assert_eq!(err.exit_code(), 2);
}
