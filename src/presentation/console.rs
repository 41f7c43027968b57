use std::io::{self, Write};

use crate::application::ports::{IndexStats, SearchResult};
use crate::application::services::{CleanupReport, UploadReport};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn render_results<W: Write>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No se encontraron resultados.")?;
        return Ok(());
    }

    for (position, result) in results.iter().enumerate() {
        let fragment = &result.fragment;
        writeln!(out, "\n--- Resultado {} ---", position + 1)?;
        writeln!(out, "Puntuación: {:.3}", result.score)?;
        writeln!(out, "Fuente: {}", fragment.source)?;
        writeln!(out, "Sección: {}", fragment.section)?;
        if !fragment.subsection.is_empty() {
            writeln!(out, "Subsección: {}", fragment.subsection)?;
        }
        writeln!(out, "Página: {}", fragment.page_number)?;
        writeln!(out, "Fragmento ID: {}", fragment.id)?;
        writeln!(out, "Palabras: {}", fragment.word_count())?;
        writeln!(out, "Texto:\n{}", fragment.text)?;
        writeln!(out, "{}", rule())?;
    }

    Ok(())
}

pub fn render_stats<W: Write>(out: &mut W, stats: &IndexStats) -> io::Result<()> {
    writeln!(out, "Estadísticas del índice:")?;
    writeln!(out, "  Vectores totales: {}", stats.total_vector_count)?;
    match stats.dimension {
        Some(dimension) => writeln!(out, "  Dimensión: {dimension}")?,
        None => writeln!(out, "  Dimensión: desconocida")?,
    }
    if let Some(metric) = &stats.metric {
        writeln!(out, "  Métrica: {metric}")?;
    }
    if let Some(vector_type) = &stats.vector_type {
        writeln!(out, "  Tipo de vector: {vector_type}")?;
    }
    for (namespace, count) in &stats.namespaces {
        let name = if namespace.is_empty() {
            "(predeterminado)"
        } else {
            namespace.as_str()
        };
        writeln!(out, "  Namespace {name}: {count} vectores")?;
    }
    Ok(())
}

/// Numbered menu; option 1 is always "all sources".
pub fn render_source_menu<W: Write>(out: &mut W, sources: &[String]) -> io::Result<()> {
    writeln!(out, "\nFuentes disponibles:")?;
    writeln!(out, "  1. Todas las fuentes")?;
    for (position, source) in sources.iter().enumerate() {
        writeln!(out, "  {}. {}", position + 2, source)?;
    }
    write!(out, "Seleccione una opción: ")?;
    out.flush()
}

pub fn render_upload_report<W: Write>(out: &mut W, report: &UploadReport) -> io::Result<()> {
    writeln!(out, "Vectores subidos: {}", report.uploaded)?;
    writeln!(out, "Lotes: {}", report.batches)?;
    if report.skipped > 0 {
        writeln!(out, "Fragmentos omitidos sin texto: {}", report.skipped)?;
    }
    for (source, count) in &report.per_source {
        writeln!(out, "  {source}: {count}")?;
    }
    Ok(())
}

pub fn render_cleanup_report<W: Write>(out: &mut W, report: &CleanupReport) -> io::Result<()> {
    render_stats(out, &report.after)?;
    writeln!(out, "Vectores eliminados: {}", report.removed())
}
