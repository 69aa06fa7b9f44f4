use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
};
use ultraverify::{AssessorBuilder, GrayImage, Parameter, QualityReport, ThresholdTable};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut path: Option<String> = None;
    let mut scans: Option<usize> = None;
    let mut thresholds: Option<PathBuf> = None;
    let mut json = false;
    let mut parallel = false;

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--scans" => {
                if let Some(v) = args.next() {
                    scans = Some(v.parse().unwrap_or(10));
                }
            }
            "--thresholds" => thresholds = args.next().map(PathBuf::from),
            "--json" => json = true,
            "--parallel" => parallel = true,
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                if path.is_none() {
                    path = Some(other.to_string());
                } else {
                    eprintln!("Лишний аргумент: {other}");
                    print_help();
                    std::process::exit(2);
                }
            }
        }
    }

    let Some(path) = path else {
        print_help();
        std::process::exit(2);
    };

    let (width, height, data) = match read_pgm_p5(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Не удалось прочитать PGM: {e}");
            std::process::exit(1);
        }
    };

    let mut builder = AssessorBuilder::new().parallel(parallel);
    if let Some(n) = scans {
        builder = builder.num_scans(n);
    }
    if let Some(p) = thresholds {
        match ThresholdTable::from_json_file(&p) {
            Ok(t) => builder = builder.thresholds(t),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    let img = GrayImage {
        width,
        height,
        data: &data,
    };
    let report = match builder.build().assess(&img) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Оценка невозможна: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("JSON: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_text(&report);
    }
}

fn print_text(report: &QualityReport) {
    println!("Barcode Quality Report          Overall: {}", report.overall_grade);
    println!("{:<5}{:<12}{:<12}{:<12}{:<8}", "Scan", "SC (Grade)", "MOD (Grade)", "DEF (Grade)", "Rmin");
    for s in &report.scans {
        let (sc, g) = (&s.scores, &s.grades);
        println!(
            "{:<5}{:<12}{:<12}{:<12}{:<8}",
            s.scan_index,
            format!("{:.0}({})", sc.symbol_contrast, g.symbol_contrast),
            format!("{:.2}({})", sc.modulation, g.modulation),
            format!("{:.2}({})", sc.defect, g.defect),
            format!("{:.0}({})", sc.rmin_pass, g.rmin_pass),
        );
    }
    println!();
    println!("Overall Summary (based on average scores)");
    println!("{:<18}{:<12}{:<6}", "Parameter", "Avg Score", "Grade");
    for p in Parameter::ALL {
        if let Some(s) = report.parameter(p) {
            println!("{:<18}{:<12.3}{:<6}", p.label(), s.average_score, s.grade.as_str());
        }
    }
}

fn print_help() {
    eprintln!(
        r#"Использование:
  cargo run --bin grade_pgm -- <path.pgm> [--scans <N>] [--thresholds <t.json>] [--json] [--parallel]

Требуется PGM P5 (8-бит, maxval=255), уже обрезанный по штрих-коду.
Уровень логов — через RUST_LOG (по умолчанию info, построчно — debug).
Примеры:
  cargo run --bin grade_pgm -- ./barcode.pgm
  cargo run --bin grade_pgm -- ./barcode.pgm --scans 12 --json
"#
    );
}

// Минимальный парсер PGM (P5, 8-бит)
fn read_pgm_p5(path: &str) -> io::Result<(usize, usize, Vec<u8>)> {
    let mut file = fs::File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    // ascii-хедер "P5\n<width> <height>\n<maxval>\n", комментарии '#'
    let mut i = 0usize;

    fn read_token(buf: &[u8], i: &mut usize) -> Option<String> {
        while *i < buf.len() {
            let c = buf[*i];
            if c == b'#' {
                while *i < buf.len() && buf[*i] != b'\n' {
                    *i += 1;
                }
            } else if c.is_ascii_whitespace() {
                *i += 1;
            } else {
                break;
            }
        }
        if *i >= buf.len() {
            return None;
        }
        let start = *i;
        while *i < buf.len() && !buf[*i].is_ascii_whitespace() {
            *i += 1;
        }
        Some(String::from_utf8_lossy(&buf[start..*i]).to_string())
    }

    let bad = |msg: &str| io::Error::new(io::ErrorKind::InvalidData, format!("PGM: {msg}"));

    let magic = read_token(&buf, &mut i).ok_or_else(|| bad("нет магической сигнатуры"))?;
    if magic != "P5" {
        return Err(bad("поддерживается только P5 (binary)"));
    }
    let mut dim = |name: &str| -> io::Result<usize> {
        read_token(&buf, &mut i)
            .ok_or_else(|| bad(&format!("нет {name}")))?
            .parse()
            .map_err(|_| bad(&format!("неверный {name}")))
    };
    let width = dim("width")?;
    let height = dim("height")?;
    let maxval = dim("maxval")?;
    if maxval != 255 {
        return Err(bad("поддерживается только maxval=255"));
    }

    if i >= buf.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "PGM: нет данных изображения",
        ));
    }
    if buf[i] == b'\n' {
        i += 1;
    }
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| bad("переполнение размера"))?;
    if buf.len() - i < expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "PGM: мало байтов данных",
        ));
    }
    let data = buf[i..i + expected].to_vec();
    Ok((width, height, data))
}
