//! Report Renderer — formats an `AnalysisResult` as a self-contained HTML fragment.
//!
//! The fragment is posted into a WordPress page, so all styling is inline and
//! scoped under `.vaitengewon-map-section`. Rendering never fails the request:
//! formatting faults degrade to [`RENDER_FAILED_HTML`].

use std::fmt::{self, Write};

use tracing::{error, info};

use crate::analysis::models::{AnalysisResult, BusinessIdea, FounderProfile};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Returned verbatim when there are no ideas to show.
pub const NO_IDEAS_HTML: &str = "<h3>Error en el Análisis</h3><p>La IA no pudo generar ideas de negocio en este momento. Por favor, intenta de nuevo con respuestas más detalladas.</p>";

/// Returned when assembling the fragment fails.
pub const RENDER_FAILED_HTML: &str =
    "<p>Hubo un error al formatear el resultado del análisis.</p>";

const MISSING_NAME: &str = "Sin Nombre";
const MISSING_TEXT: &str = "N/A";

const STYLES: &str = r#"<style>
.vaitengewon-map-section .profile-summary { background-color: #faf8fc; border-left: 4px solid #7030A0; padding: 12px 16px; margin-bottom: 20px; }
.vaitengewon-map-section .profile-summary h3 { margin-top: 0; font-family: 'Ubuntu', sans-serif; color: #7030A0; }
.vaitengewon-map-section .profile-summary ul { margin: 0; padding-left: 18px; }
.vaitengewon-map-section .idea-card { border: 1px solid #e0e0e0; border-radius: 8px; margin-bottom: 20px; box-shadow: 0 2px 5px rgba(0,0,0,0.05); }
.vaitengewon-map-section .idea-header { background-color: #f7f5fa; padding: 15px; border-bottom: 1px solid #e0e0e0; display: flex; justify-content: space-between; align-items: center; }
.vaitengewon-map-section .idea-header h3 { margin: 0; font-family: 'Ubuntu', sans-serif; color: #7030A0; font-size: 1.2em; }
.vaitengewon-map-section .score { font-weight: bold; color: #333; }
.vaitengewon-map-section .score .stars { color: #ffc107; font-size: 1.3em; }
.vaitengewon-map-section .idea-body { padding: 20px; }
.vaitengewon-map-section .idea-body h4 { margin-top: 0; font-family: 'Ubuntu', sans-serif; color: #555; }
.vaitengewon-map-section .idea-body p { margin-bottom: 10px; }
</style>
"#;

/// Renders the report. Same input, same bytes: no timestamps or random ids.
pub fn render_report(analysis: &AnalysisResult, profile: Option<&FounderProfile>) -> String {
    if analysis.ideas.is_empty() {
        return NO_IDEAS_HTML.to_string();
    }

    match try_render(&analysis.ideas, profile) {
        Ok(html) => {
            info!("HTML report rendered ({} ideas, {} bytes)", analysis.ideas.len(), html.len());
            html
        }
        Err(e) => {
            error!("Failed to render HTML report: {e}");
            RENDER_FAILED_HTML.to_string()
        }
    }
}

fn try_render(ideas: &[BusinessIdea], profile: Option<&FounderProfile>) -> Result<String, fmt::Error> {
    let mut html = String::with_capacity(STYLES.len() + ideas.len() * 1024);
    html.push_str(STYLES);
    html.push_str("<div class=\"vaitengewon-map-section\">\n");

    if let Some(profile) = profile {
        write_profile_summary(&mut html, profile)?;
    }
    for (i, idea) in ideas.iter().enumerate() {
        write_card(&mut html, i + 1, idea)?;
    }

    html.push_str("</div>\n");
    Ok(html)
}

fn write_profile_summary(out: &mut String, profile: &FounderProfile) -> fmt::Result {
    writeln!(out, "<div class=\"profile-summary\">")?;
    writeln!(out, "<h3>Tu Perfil de Fundador</h3>")?;
    writeln!(out, "<ul>")?;
    for (label, value) in [
        ("Punto de Partida", &profile.punto_de_partida),
        ("Personalidad", &profile.personalidad_fundador),
        ("Pasiones", &profile.pasiones_fundador),
        ("Recursos y Habilidades", &profile.recursos_fundador),
        ("Estilo de Vida Deseado", &profile.estilo_vida_deseado),
    ] {
        writeln!(out, "<li><strong>{label}:</strong> {}</li>", escape_html(value))?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</div>")
}

fn write_card(out: &mut String, ordinal: usize, idea: &BusinessIdea) -> fmt::Result {
    let rating = clamp_rating(idea.calificacion);
    write!(
        out,
        r#"<div class="idea-card">
<div class="idea-header">
<h3>{ordinal}. {name}</h3>
<div class="score"><span class="stars">{stars}</span> ({rating}/{MAX_RATING})</div>
</div>
<div class="idea-body">
<p><strong>Descripción:</strong> {description}</p>
<h4>Análisis de Viabilidad</h4>
<p><strong>Mercado (Océano/Potencial):</strong> {market}</p>
<p><strong>Sinergia Personal (Perfil/Habilidades):</strong> {personal}</p>
<p><strong>Justificación de la Calificación:</strong> <em>{justification}</em></p>
</div>
</div>
"#,
        name = text_or(&idea.nombre, MISSING_NAME),
        stars = star_rating(rating),
        description = text_or(&idea.descripcion, MISSING_TEXT),
        market = text_or(&idea.viabilidad_mercado, MISSING_TEXT),
        personal = text_or(&idea.viabilidad_personal, MISSING_TEXT),
        justification = text_or(&idea.razon_calificacion, MISSING_TEXT),
    )
}

/// Clamps a model rating into 1..=5. Absent ratings count as the minimum.
pub fn clamp_rating(rating: Option<i64>) -> i64 {
    rating.unwrap_or(MIN_RATING).clamp(MIN_RATING, MAX_RATING)
}

/// Always five glyphs: `rating` filled, the rest hollow.
pub fn star_rating(rating: i64) -> String {
    let filled = rating.clamp(MIN_RATING, MAX_RATING) as usize;
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(MAX_RATING as usize - filled));
    stars
}

fn text_or(value: &Option<String>, placeholder: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => placeholder.to_string(),
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(name: &str, rating: i64) -> BusinessIdea {
        BusinessIdea {
            nombre: Some(name.to_string()),
            descripcion: Some("Pan artesanal por suscripción".to_string()),
            viabilidad_mercado: Some("Océano rojo, potencial medio".to_string()),
            viabilidad_personal: Some("Encaja con su pasión; debe aprender ventas".to_string()),
            calificacion: Some(rating),
            razon_calificacion: Some("Mercado competido pero fiel".to_string()),
        }
    }

    fn analysis(ideas: Vec<BusinessIdea>) -> AnalysisResult {
        AnalysisResult { ideas, error: None }
    }

    #[test]
    fn test_empty_ideas_render_fallback_verbatim() {
        assert_eq!(render_report(&AnalysisResult::default(), None), NO_IDEAS_HTML);
        assert_eq!(
            render_report(&AnalysisResult::failed("parse error"), None),
            NO_IDEAS_HTML
        );
    }

    #[test]
    fn test_star_rating_has_five_glyphs_for_every_rating() {
        for r in MIN_RATING..=MAX_RATING {
            let stars = star_rating(r);
            assert_eq!(stars.chars().count(), 5);
            assert_eq!(stars.chars().filter(|&c| c == '★').count() as i64, r);
            assert_eq!(stars.chars().filter(|&c| c == '☆').count() as i64, 5 - r);
        }
    }

    #[test]
    fn test_out_of_range_ratings_are_clamped() {
        assert_eq!(clamp_rating(Some(0)), 1);
        assert_eq!(clamp_rating(Some(-3)), 1);
        assert_eq!(clamp_rating(Some(9)), 5);
        assert_eq!(clamp_rating(None), 1);
        assert_eq!(star_rating(12), "★★★★★");
        assert_eq!(star_rating(-1), "★☆☆☆☆");
    }

    #[test]
    fn test_cards_are_one_indexed_with_stars() {
        let html = render_report(&analysis(vec![idea("Masa Madre Club", 3), idea("PanBot", 5)]), None);
        assert_eq!(html.matches("class=\"idea-card\"").count(), 2);
        assert!(html.contains("<h3>1. Masa Madre Club</h3>"));
        assert!(html.contains("<h3>2. PanBot</h3>"));
        assert!(html.contains("★★★☆☆</span> (3/5)"));
        assert!(html.contains("★★★★★</span> (5/5)"));
        assert!(html.starts_with("<style>"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let html = render_report(&analysis(vec![BusinessIdea::default()]), None);
        assert!(html.contains("<h3>1. Sin Nombre</h3>"));
        assert!(html.contains("<strong>Descripción:</strong> N/A"));
        assert!(html.contains("★☆☆☆☆</span> (1/5)"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let mut hostile = idea("<script>alert(1)</script>", 4);
        hostile.descripcion = Some("Tom & Jerry's \"pan\"".to_string());
        let html = render_report(&analysis(vec![hostile]), None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry&#x27;s &quot;pan&quot;"));
    }

    #[test]
    fn test_profile_summary_is_included_when_given() {
        let profile = FounderProfile {
            punto_de_partida: "bakery app".to_string(),
            personalidad_fundador: "ENFP".to_string(),
            pasiones_fundador: "cocina".to_string(),
            recursos_fundador: "ahorros".to_string(),
            estilo_vida_deseado: "nómada".to_string(),
            wp_user_id: "42".to_string(),
        };
        let html = render_report(&analysis(vec![idea("PanBot", 4)]), Some(&profile));
        assert!(html.contains("Tu Perfil de Fundador"));
        assert!(html.contains("<li><strong>Punto de Partida:</strong> bakery app</li>"));
        assert!(!html.contains("42"), "caller id must not leak into the report");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let result = analysis(vec![idea("Masa Madre Club", 3), idea("PanBot", 5)]);
        assert_eq!(render_report(&result, None), render_report(&result, None));
    }
}
