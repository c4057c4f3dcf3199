use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const BIB: &str = r#"
@article{wu2023,
    author = {Wu, Zexuan and Smith, Anna and Lee, Bo and Kim, Cy and Ng, Di and Oh, Ed},
    title = {Free-Floating Planets in the Galactic Bulge},
    journal = {Nature},
    year = {2023},
    doi = {10.1038/s41586-023-00001-x},
}

@article{late2022,
    author = {Smith, Anna and Lee, Bo and Kim, Cy and Ng, Di and Oh, Ed and Wu, Zexuan},
    title = {A Binary Lens at Late Times},
    year = {2022},
}

@misc{untitled,
    author = {Nobody, Anne},
}
"#;

const CSL: &str = r#"[
    {
        "id": "csl2024",
        "title": "Rogue Planets",
        "author": [{"given": "Zexuan", "family": "Wu"}, {"literal": "KMTNet Collaboration"}],
        "container-title": "\\apj",
        "issued": {"date-parts": [[2024]]}
    }
]"#;

fn pubpage(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pubpage").expect("binary");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8(strip_ansi_escapes::strip(&output.stderr)).expect("utf8")
}

#[test]
fn publications_from_bibtex() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("pub.bib"), BIB)?;

    let output = pubpage(&dir).arg("publications").arg("pub.bib").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone())?;
    let stderr = stderr_of(&output);

    assert!(stdout.contains("Free-Floating Planets in the Galactic Bulge"));
    assert!(stdout.contains(", and 1 authors.</div>"), "stdout=\n{stdout}");
    assert!(
        stdout.contains(
            r#", and 1 authors including <span class="highlight-name">Z. Wu</span>.</div>"#
        ),
        "stdout=\n{stdout}"
    );
    assert!(stdout.contains(r#"<a href="https://doi.org/10.1038/s41586-023-00001-x""#));
    assert!(stdout.find("wu2023.png").unwrap() < stdout.find("late2022.png").unwrap());
    assert!(stderr.contains("✓ 2 ✗ 1"), "stderr=\n{stderr}");
    Ok(())
}

#[test]
fn publications_from_csl_json_use_aliases() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("pub.json"), CSL)?;

    pubpage(&dir)
        .arg("publications")
        .arg("pub.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("<i>ApJ</i>, 2024"))
        .stdout(predicate::str::contains(
            r#"<span class="highlight-name">Zexuan Wu</span>.</div>"#,
        ))
        .stdout(predicate::str::contains("KMTNet").not());
    Ok(())
}

#[test]
fn missing_bibliography_renders_unavailable_notice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let output = pubpage(&dir).arg("publications").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone())?;
    let stderr = stderr_of(&output);
    assert_eq!(
        stdout,
        "<p>Error loading publications. Please try again later.</p>"
    );
    assert!(stderr.contains("failed to read static/pub.bib"), "stderr=\n{stderr}");
    Ok(())
}

#[test]
fn unparseable_bibliography_renders_unavailable_notice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("static"))?;
    fs::write(
        dir.path().join("static/pub.bib"),
        "@article{bad,\n    title = {Unclosed,\n",
    )?;

    let output = pubpage(&dir).arg("publications").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone())?;
    let stderr = stderr_of(&output);
    assert_eq!(
        stdout,
        "<p>Error loading publications. Please try again later.</p>"
    );
    assert!(
        stderr.contains("failed to read bibliography static/pub.bib")
            && stderr.contains("no readable entries"),
        "stderr=\n{stderr}"
    );
    Ok(())
}

#[test]
fn raw_journal_name_is_escaped_in_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("pub.bib"),
        "@article{aa, title = {Escaping Test}, journal = {Annals <Draft>}, year = {2021}}\n",
    )?;

    pubpage(&dir)
        .arg("publications")
        .arg("pub.bib")
        .assert()
        .success()
        .stdout(predicate::str::contains("Annals &lt;Draft&gt;, 2021"))
        .stdout(predicate::str::contains("<Draft>").not());
    Ok(())
}

#[test]
fn config_changes_owner_and_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("pub.bib"), BIB)?;
    fs::write(
        dir.path().join("pubpage.toml"),
        "[owner]\ngiven = \"Anna\"\nfamily = \"Smith\"\n\n[publications]\nmax_authors = 2\n",
    )?;

    pubpage(&dir)
        .arg("authors")
        .arg("pub.bib")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"wu2023: Zexuan Wu, <span class="highlight-name">Anna Smith</span>, and 4 authors."#,
        ))
        .stdout(predicate::str::contains(
            r#"late2022: <span class="highlight-name">Anna Smith</span>, Bo Lee, and 4 authors."#,
        ));
    Ok(())
}

#[test]
fn gallery_writes_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pubpage(&dir)
        .args(["gallery", "-o", "gallery.html"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(dir.path().join("gallery.html"))?;
    assert!(html.contains(r#"<div id="video-row-general" class="video-row">"#));
    assert!(html.contains("./static/ani/1Me_1Rsun_murel5.0_Dl6.mp4"));
    Ok(())
}

#[test]
fn page_uses_configured_source() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("static"))?;
    fs::write(dir.path().join("static/pub.bib"), BIB)?;

    pubpage(&dir)
        .arg("page")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("A Binary Lens at Late Times"))
        .stdout(predicate::str::contains(r#"<div id="imageModal" class="modal">"#));
    Ok(())
}

#[test]
fn bad_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("pubpage.toml"), "[publications]\nmax_authors = 0\n")?;

    pubpage(&dir)
        .arg("gallery")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_authors"));
    Ok(())
}
