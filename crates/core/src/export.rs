//! Saving stage results to disk.
//!
//! Text content is written as is; anything else becomes pretty-printed
//! JSON. Files land in the reports directory through a temporary file that
//! is persisted into place.

use cp_protocol::run_models::PipelineRun;
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Filename used for the whole content plan.
pub const COMPLETE_PLAN_FILENAME: &str = "complete_content_plan.json";

/// Filename for a plan that carries none of the structured fields.
pub const CONTENT_CALENDAR_FILENAME: &str = "content_calendar.json";

/// Filename for the whole video production response.
pub const VIDEO_PRODUCTION_FILENAME: &str = "video_production.json";

/// Filename for the whole podcast production response.
pub const PODCAST_PRODUCTION_FILENAME: &str = "podcast_production.json";

/// One downloadable result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFile {
    pub filename: String,
    pub description: &'static str,
    pub content: Value,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid report filename: {0:?}")]
    InvalidFilename(String),

    #[error("failed to create reports directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {filename}: {source}")]
    Serialize {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// The file body for `content`.
pub fn render_report(content: &Value) -> Result<String, serde_json::Error> {
    match content {
        Value::String(text) => Ok(text.clone()),
        other => serde_json::to_string_pretty(other),
    }
}

/// Keep only the final path component of `filename`.
pub fn sanitize_filename(filename: &str) -> ExportResult<String> {
    let name = Path::new(filename.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty());

    match name {
        Some(name) => Ok(name.to_string()),
        None => Err(ExportError::InvalidFilename(filename.to_string())),
    }
}

/// Write one report into `dir` and return the final path.
pub fn save_report(dir: &Path, filename: &str, content: &Value) -> ExportResult<PathBuf> {
    let name = sanitize_filename(filename)?;
    let body = render_report(content).map_err(|source| ExportError::Serialize {
        filename: name.clone(),
        source,
    })?;

    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(&name);
    let write_err = |source| ExportError::Write {
        path: path.clone(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(body.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), bytes = body.len(), "report saved");
    Ok(path)
}

/// Every result a run has produced so far, in display order: research
/// reports, the complete plan, the individual content-plan files, then the
/// video and podcast payloads with the files they carry.
///
/// Filenames are unique once sanitized. A later entry whose name is taken
/// gets a numbered suffix (`summary (1).md`), so saving every file never
/// overwrites an earlier one.
pub fn result_files(run: &PipelineRun) -> Vec<ResultFile> {
    let mut files = Vec::new();

    if let Some(reports) = &run.research_reports {
        for (filename, content) in reports {
            let description = if filename.contains(".json") {
                "Market data and analysis"
            } else {
                "Research summary"
            };
            files.push(ResultFile {
                filename: filename.clone(),
                description,
                content: content.clone(),
            });
        }
    }

    if let Some(plan) = &run.content_plan {
        files.push(ResultFile {
            filename: COMPLETE_PLAN_FILENAME.to_string(),
            description: "Complete plan execution result, research summary, outputs, and detailed content plans",
            content: plan.as_value().clone(),
        });

        if let Some(plans) = plan.content_plans() {
            for (filename, content) in plans {
                let description = if filename.contains(".json") {
                    "Content strategy data"
                } else if filename.contains(".md") {
                    "Content plan document"
                } else {
                    "Content plan file"
                };
                files.push(ResultFile {
                    filename: filename.clone(),
                    description,
                    content: content.clone(),
                });
            }
        }

        if plan.is_unstructured() {
            files.push(ResultFile {
                filename: CONTENT_CALENDAR_FILENAME.to_string(),
                description: "Detailed content schedule and topics",
                content: plan.as_value().clone(),
            });
        }
    }

    if let Some(output) = &run.video_output {
        files.push(ResultFile {
            filename: VIDEO_PRODUCTION_FILENAME.to_string(),
            description: "Video production result and video link",
            content: output.clone(),
        });
        push_nested(&mut files, output, "video_production_files", "Video production file");
    }

    if let Some(output) = &run.podcast_output {
        files.push(ResultFile {
            filename: PODCAST_PRODUCTION_FILENAME.to_string(),
            description: "Podcast production result",
            content: output.clone(),
        });
        push_nested(&mut files, output, "podcast_episodes", "Podcast episode");
    }

    dedupe_filenames(&mut files);
    files
}

/// Push one file per entry of the `key` object inside a production response.
fn push_nested(files: &mut Vec<ResultFile>, output: &Value, key: &str, description: &'static str) {
    if let Some(entries) = output.get(key).and_then(Value::as_object) {
        for (filename, content) in entries {
            files.push(ResultFile {
                filename: filename.clone(),
                description,
                content: content.clone(),
            });
        }
    }
}

/// Rename entries whose sanitized name was already taken.
///
/// Names are compared case-insensitively. Names that do not sanitize are
/// left alone; saving them fails with [`ExportError::InvalidFilename`].
fn dedupe_filenames(files: &mut [ResultFile]) {
    let mut taken = HashSet::new();

    for file in files.iter_mut() {
        let Ok(name) = sanitize_filename(&file.filename) else {
            continue;
        };

        if taken.insert(name.to_lowercase()) {
            continue;
        }

        let mut n = 1;
        let unique = loop {
            let candidate = numbered(&name, n);
            if !taken.contains(&candidate.to_lowercase()) {
                break candidate;
            }
            n += 1;
        };
        tracing::debug!(from = %file.filename, to = %unique, "renamed duplicate result file");
        taken.insert(unique.to_lowercase());
        file.filename = unique;
    }
}

/// `summary.md` with `n = 2` becomes `summary (2).md`.
fn numbered(name: &str, n: usize) -> String {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}

/// Save every file from [`result_files`] into `dir`.
pub fn save_run(dir: &Path, run: &PipelineRun) -> ExportResult<Vec<PathBuf>> {
    result_files(run)
        .iter()
        .map(|file| save_report(dir, &file.filename, &file.content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_protocol::planning_models::ContentPlan;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_text_passes_through() {
        let body = render_report(&json!("# Summary\nplain text")).unwrap();
        assert_eq!(body, "# Summary\nplain text");
    }

    #[test]
    fn test_structured_content_is_pretty_json() {
        let content = json!({ "trends": ["a", "b"], "score": 3, "nested": { "k": null } });
        let body = render_report(&content).unwrap();

        assert!(body.contains('\n'));
        let parsed: Value = serde_json::from_str(&body).unwrap();
        for key in ["trends", "score", "nested"] {
            assert!(parsed.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("report.json").unwrap(), "report.json");
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
    }

    #[test]
    fn test_save_report_writes_file() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");

        let path = save_report(&reports, "summary.json", &json!({ "a": 1 })).unwrap();

        assert_eq!(path, reports.join("summary.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_save_report_overwrites() {
        let dir = tempdir().unwrap();
        save_report(dir.path(), "r.txt", &json!("first")).unwrap();
        let path = save_report(dir.path(), "r.txt", &json!("second")).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_save_run_writes_every_result() {
        let dir = tempdir().unwrap();
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("market.txt".to_string(), json!("market notes"));
        run.research_reports = Some(reports);
        run.content_plan = Some(ContentPlan::new(json!({
            "state": "COMPLETE",
            "content_plans": { "calendar.md": "# Calendar" }
        })));

        let saved = save_run(dir.path(), &run).unwrap();

        assert_eq!(saved.len(), 3);
        assert!(dir.path().join("market.txt").exists());
        assert!(dir.path().join(COMPLETE_PLAN_FILENAME).exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("calendar.md")).unwrap(),
            "# Calendar"
        );
    }

    #[test]
    fn test_result_files_describe_each_entry() {
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("data.json".to_string(), json!({}));
        reports.insert("summary.txt".to_string(), json!("text"));
        run.research_reports = Some(reports);
        run.content_plan = Some(ContentPlan::new(json!({
            "content_plans": { "a.json": {}, "b.md": "", "c.txt": "" }
        })));

        let descriptions: Vec<&str> = result_files(&run).iter().map(|f| f.description).collect();
        assert_eq!(
            descriptions,
            vec![
                "Market data and analysis",
                "Research summary",
                "Complete plan execution result, research summary, outputs, and detailed content plans",
                "Content strategy data",
                "Content plan document",
                "Content plan file",
            ]
        );
    }

    #[test]
    fn test_unstructured_plan_adds_calendar() {
        let mut run = PipelineRun::new();
        run.content_plan = Some(ContentPlan::new(json!({ "raw": "output" })));

        let names: Vec<String> = result_files(&run).into_iter().map(|f| f.filename).collect();
        assert_eq!(names, vec![COMPLETE_PLAN_FILENAME, CONTENT_CALENDAR_FILENAME]);
    }

    #[test]
    fn test_colliding_names_get_numbered() {
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("summary.md".to_string(), json!("RESEARCH SUMMARY"));
        reports.insert("a/x.md".to_string(), json!("first x"));
        reports.insert("b/x.md".to_string(), json!("second x"));
        run.research_reports = Some(reports);
        run.content_plan = Some(ContentPlan::new(json!({
            "content_plans": {
                "summary.md": "PLAN SUMMARY",
                "complete_content_plan.json": { "nested": true }
            }
        })));

        let names: Vec<String> = result_files(&run).into_iter().map(|f| f.filename).collect();
        assert_eq!(
            names,
            vec![
                "a/x.md",
                "x (1).md",
                "summary.md",
                COMPLETE_PLAN_FILENAME,
                "complete_content_plan (1).json",
                "summary (1).md",
            ]
        );
    }

    #[test]
    fn test_save_run_keeps_every_colliding_file() {
        let dir = tempdir().unwrap();
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("summary.md".to_string(), json!("RESEARCH SUMMARY"));
        reports.insert("a/x.md".to_string(), json!("first x"));
        reports.insert("b/x.md".to_string(), json!("second x"));
        run.research_reports = Some(reports);
        run.content_plan = Some(ContentPlan::new(json!({
            "state": "COMPLETE",
            "content_plans": { "summary.md": "PLAN SUMMARY" }
        })));

        let saved = save_run(dir.path(), &run).unwrap();

        let on_disk = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(saved.len(), 5);
        assert_eq!(on_disk, saved.len());

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("summary.md"), "RESEARCH SUMMARY");
        assert_eq!(read("summary (1).md"), "PLAN SUMMARY");
        assert_eq!(read("x.md"), "first x");
        assert_eq!(read("x (1).md"), "second x");
    }

    #[test]
    fn test_numbered_suffix_skips_taken_names() {
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("notes (1).txt".to_string(), json!("taken"));
        reports.insert("notes.txt".to_string(), json!("original"));
        reports.insert("x/notes.txt".to_string(), json!("duplicate"));
        reports.insert("NOTES.TXT".to_string(), json!("shouting"));
        run.research_reports = Some(reports);

        let names: Vec<String> = result_files(&run).into_iter().map(|f| f.filename).collect();
        assert_eq!(
            names,
            vec!["NOTES.TXT", "notes (1).txt", "notes (2).txt", "notes (3).txt"]
        );
    }

    #[test]
    fn test_media_payloads_are_listed() {
        let mut run = PipelineRun::new();
        run.video_output = Some(json!({
            "video_link": "https://ai.invideo.io/watch/abc",
            "video_production_files": { "script.md": "# Script" }
        }));
        run.podcast_output = Some(json!({
            "podcast_episodes": { "episode_1.json": { "title": "One" }, "script.md": "# Ep" }
        }));

        let files = result_files(&run);
        let entries: Vec<(&str, &str)> = files
            .iter()
            .map(|f| (f.filename.as_str(), f.description))
            .collect();
        assert_eq!(
            entries,
            vec![
                (VIDEO_PRODUCTION_FILENAME, "Video production result and video link"),
                ("script.md", "Video production file"),
                (PODCAST_PRODUCTION_FILENAME, "Podcast production result"),
                ("episode_1.json", "Podcast episode"),
                ("script (1).md", "Podcast episode"),
            ]
        );
        assert_eq!(files[4].content, json!("# Ep"));
    }

    #[test]
    fn test_save_run_without_results_writes_nothing() {
        let dir = tempdir().unwrap();
        let saved = save_run(dir.path(), &PipelineRun::new()).unwrap();
        assert!(saved.is_empty());
    }
}
