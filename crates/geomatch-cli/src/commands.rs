use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use geomatch_cli::pipeline::{
    LoadedTables, assign_records, load_tables, resolve_output_path, write_output,
};
use geomatch_cli::prompt::{
    Prompt, StdinPrompt, prompt_path, select_csv_from, select_csv_interactive,
};
use geomatch_cli::report::{RunReport, write_run_report};
use geomatch_ingest::matched_filenames;
use geomatch_model::{DegreeThreshold, MatchPolicy};
use geomatch_relocate::{FileIndex, copy_matched};

use crate::cli::{CollectArgs, MatchArgs, PolicyArg};
use crate::types::{CollectResult, MatchResult};

pub fn run_match(args: &MatchArgs) -> Result<MatchResult> {
    run_match_with(args, &mut StdinPrompt)
}

pub fn run_collect(args: &CollectArgs) -> Result<CollectResult> {
    run_collect_with(args, &mut StdinPrompt)
}

/// Match flow with the prompt seam exposed for tests.
fn run_match_with(args: &MatchArgs, prompt: &mut dyn Prompt) -> Result<MatchResult> {
    let span = info_span!("match");
    let _guard = span.enter();

    let lateral_file = match &args.lateral_file {
        Some(path) => path.clone(),
        None => select_csv_interactive(prompt, "lateral survey")?,
    };
    let raw_file = match &args.raw_file {
        Some(path) => path.clone(),
        None => select_csv_interactive(prompt, "raw event")?,
    };
    let output = match &args.output {
        Some(path) => path.clone(),
        None => prompt_path(prompt, "Enter the output file or folder: ")?,
    };
    let output_file = resolve_output_path(&output);

    let policy = match args.policy {
        PolicyArg::WithRemoval => MatchPolicy::WithRemoval,
        PolicyArg::WithoutRemoval => MatchPolicy::WithoutRemoval,
    };
    // Pair-wise presence is enforced by clap; a single flag never gets here.
    let threshold = match (args.max_lat_diff, args.max_lon_diff) {
        (Some(lat), Some(lon)) => Some(DegreeThreshold::new(lat, lon)),
        _ => None,
    };

    let start = Instant::now();
    let LoadedTables {
        lateral,
        queries,
        candidates,
    } = load_tables(&lateral_file, &raw_file)?;
    let query_count = queries.len();
    let pool_size = candidates.len();

    let run = assign_records(&queries, candidates, policy, threshold)?;
    write_output(&lateral, &run, &output_file)?;
    info!(
        queries = query_count,
        matched = run.matched_count(),
        duration_ms = start.elapsed().as_millis(),
        "match complete"
    );

    if let Some(report_path) = &args.report_json {
        let report = RunReport::from_run(
            &run,
            policy,
            threshold,
            &lateral_file,
            &raw_file,
            &output_file,
            pool_size,
        );
        write_run_report(&report, report_path)?;
    }

    Ok(MatchResult {
        lateral_file,
        raw_file,
        output_file,
        policy,
        threshold,
        queries: query_count,
        pool: pool_size,
        matched: run.matched_count(),
        no_candidates: run.no_candidates_count(),
        outside_threshold: run.outside_threshold_count(),
        max_score: run.max_score(),
        mean_score: run.mean_score(),
        report_json: args.report_json.clone(),
    })
}

/// Collect flow with the prompt seam exposed for tests.
fn run_collect_with(args: &CollectArgs, prompt: &mut dyn Prompt) -> Result<CollectResult> {
    let span = info_span!("collect");
    let _guard = span.enter();

    let csv_file = resolve_matched_csv(args, prompt)?;
    let source_folder = match &args.source_folder {
        Some(path) => path.clone(),
        None => prompt_path(prompt, "Enter the folder to search for matched files: ")?,
    };
    let destination_folder = match &args.destination_folder {
        Some(path) => path.clone(),
        None => prompt_path(prompt, "Enter the folder to copy matched files into: ")?,
    };

    let filenames = matched_filenames(&csv_file)
        .with_context(|| format!("read matched filenames from {}", csv_file.display()))?;

    let start = Instant::now();
    let index = FileIndex::build(&source_folder).context("index source folder")?;
    info!(
        files = index.len(),
        duration_ms = start.elapsed().as_millis(),
        "source folder indexed"
    );

    let bar = progress_bar(filenames.len() as u64);
    let report = copy_matched(&filenames, &index, &destination_folder, |name| {
        bar.set_message(name.to_string());
        bar.inc(1);
    })
    .context("copy matched files")?;
    bar.finish_and_clear();

    Ok(CollectResult {
        csv_file,
        source_folder,
        destination_folder,
        report,
    })
}

fn resolve_matched_csv(args: &CollectArgs, prompt: &mut dyn Prompt) -> Result<PathBuf> {
    if let Some(file) = &args.csv_file {
        return Ok(file.clone());
    }
    if let Some(folder) = &args.csv_folder {
        return select_csv_from(prompt, folder, "matched output");
    }
    select_csv_interactive(prompt, "matched output")
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

#[cfg(test)]
mod tests {
    use std::fs;

    use geomatch_cli::prompt::ScriptedPrompt;

    use super::*;

    const LATERAL_CSV: &str = "\
Inspection,GPS latitude,GPS longitude
INS-1,52.3710,4.8960
INS-2,52.3800,4.9000
";

    const RAW_CSV: &str = "\
Event,GPS latitude,GPS longitude,!\"Filename\"
E1,52.3711,4.8961,frame_0001.jpg
E2,52.3799,4.9001,frame_0002.jpg
";

    fn match_args(lateral: PathBuf, raw: PathBuf, output: PathBuf) -> MatchArgs {
        MatchArgs {
            lateral_file: Some(lateral),
            raw_file: Some(raw),
            output: Some(output),
            policy: PolicyArg::WithRemoval,
            max_lat_diff: None,
            max_lon_diff: None,
            report_json: None,
        }
    }

    #[test]
    fn test_match_command_writes_output_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let lateral = dir.path().join("lateral.csv");
        let raw = dir.path().join("raw.csv");
        fs::write(&lateral, LATERAL_CSV).unwrap();
        fs::write(&raw, RAW_CSV).unwrap();
        let output = dir.path().join("out.csv");

        let args = match_args(lateral, raw, output.clone());
        let result = run_match_with(&args, &mut ScriptedPrompt::new(&[])).unwrap();

        assert_eq!(result.queries, 2);
        assert_eq!(result.pool, 2);
        assert_eq!(result.matched, 2);
        assert_eq!(result.pool_remaining(), 0);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("Matched Filename"));
        assert!(written.contains("frame_0001.jpg"));
    }

    #[test]
    fn test_match_command_resolves_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let lateral = dir.path().join("lateral.csv");
        let raw = dir.path().join("raw.csv");
        fs::write(&lateral, LATERAL_CSV).unwrap();
        fs::write(&raw, RAW_CSV).unwrap();

        let args = match_args(lateral, raw, dir.path().to_path_buf());
        let result = run_match_with(&args, &mut ScriptedPrompt::new(&[])).unwrap();

        assert_eq!(result.output_file, dir.path().join("matched_output.csv"));
        assert!(result.output_file.is_file());
    }

    #[test]
    fn test_match_command_prompts_for_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let lateral_dir = dir.path().join("lateral");
        let raw_dir = dir.path().join("raw");
        fs::create_dir_all(&lateral_dir).unwrap();
        fs::create_dir_all(&raw_dir).unwrap();
        fs::write(lateral_dir.join("lateral.csv"), LATERAL_CSV).unwrap();
        fs::write(raw_dir.join("raw.csv"), RAW_CSV).unwrap();
        let output = dir.path().join("out.csv");

        let args = MatchArgs {
            lateral_file: None,
            raw_file: None,
            output: Some(output.clone()),
            policy: PolicyArg::WithoutRemoval,
            max_lat_diff: None,
            max_lon_diff: None,
            report_json: None,
        };
        // Folder then menu selection, once per missing table.
        let mut prompt = ScriptedPrompt::new(&[
            lateral_dir.to_str().unwrap(),
            "1",
            raw_dir.to_str().unwrap(),
            "1",
        ]);
        let result = run_match_with(&args, &mut prompt).unwrap();

        assert_eq!(result.matched, 2);
        assert!(output.is_file());
    }

    #[test]
    fn test_match_command_rejects_missing_lateral_file() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.csv");
        fs::write(&raw, RAW_CSV).unwrap();

        let args = match_args(dir.path().join("nope.csv"), raw, dir.path().join("out.csv"));
        let error = run_match_with(&args, &mut ScriptedPrompt::new(&[])).unwrap_err();
        assert!(error.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_match_command_writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let lateral = dir.path().join("lateral.csv");
        let raw = dir.path().join("raw.csv");
        fs::write(&lateral, LATERAL_CSV).unwrap();
        fs::write(&raw, RAW_CSV).unwrap();
        let report_path = dir.path().join("report.json");

        let mut args = match_args(lateral, raw, dir.path().join("out.csv"));
        args.report_json = Some(report_path.clone());
        run_match_with(&args, &mut ScriptedPrompt::new(&[])).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(report["matched"], 2);
        assert_eq!(report["policy"], "with-removal");
    }

    #[test]
    fn test_collect_command_copies_matched_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir_all(source.join("day1")).unwrap();
        fs::write(source.join("day1/frame_0001.jpg"), b"one").unwrap();
        fs::write(source.join("day1/frame_0002.jpg"), b"two").unwrap();
        let matched = dir.path().join("matched.csv");
        fs::write(
            &matched,
            "Inspection,Matched Filename\nINS-1,frame_0001.jpg\nINS-2,\nINS-3,frame_0002.jpg\n",
        )
        .unwrap();
        let dest = dir.path().join("collected");

        let args = CollectArgs {
            source_folder: Some(source),
            destination_folder: Some(dest.clone()),
            csv_folder: None,
            csv_file: Some(matched),
        };
        let result = run_collect_with(&args, &mut ScriptedPrompt::new(&[])).unwrap();

        assert_eq!(result.report.copied_count(), 2);
        assert_eq!(result.report.skipped, 1);
        assert!(dest.join("frame_0001.jpg").is_file());
    }

    #[test]
    fn test_collect_command_selects_csv_from_folder_menu() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("frame_0001.jpg"), b"one").unwrap();
        let csv_dir = dir.path().join("tables");
        fs::create_dir_all(&csv_dir).unwrap();
        fs::write(
            csv_dir.join("matched.csv"),
            "Inspection,Matched Filename\nINS-1,frame_0001.jpg\n",
        )
        .unwrap();
        let dest = dir.path().join("collected");

        let args = CollectArgs {
            source_folder: Some(source),
            destination_folder: Some(dest),
            csv_folder: Some(csv_dir.clone()),
            csv_file: None,
        };
        let result = run_collect_with(&args, &mut ScriptedPrompt::new(&["1"])).unwrap();

        assert_eq!(result.csv_file, csv_dir.join("matched.csv"));
        assert_eq!(result.report.copied_count(), 1);
    }
}
