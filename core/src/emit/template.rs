use crate::error::{CoreError, CoreResult};
use crate::registry::validate::ValidatedCheck;
use std::collections::BTreeMap;

/// Fixed detail-page template. Bilingual fields are emitted as parallel
/// `data-fr`/`data-en` attributes on one element so the client-side toggle
/// can switch language without refetching; the page boots with French
/// active (`data-active-lang="fr"`, `aria-checked="false"`). Shared assets
/// and the parent listing live one directory up from the detail pages.
pub const DETAIL_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title_fr} · Pre-Check</title>
    <link rel="stylesheet" href="../assets/css/style.css" />
  </head>
  <body data-page="detail">
    <header class="primary-header" role="banner">
      <div class="header-content">
        <a class="brand" href="../index.html">
          <span class="brand-title">Centre MAESTRIA</span>
          <span class="brand-subtitle">Consistency Checker</span>
        </a>
        <button
          class="language-switch"
          type="button"
          role="switch"
          data-language-toggle
          data-aria-label-to-en="Passer l'interface en anglais"
          data-aria-label-to-fr="Switch interface to French"
          aria-checked="false"
          data-active-lang="fr"
          aria-label="Passer l'interface en anglais"
          title="Passer l'interface en anglais"
        >
          <span class="language-switch-track">
            <span class="language-switch-option language-switch-option--fr">FR</span>
            <span class="language-switch-option language-switch-option--en">EN</span>
            <span class="language-switch-thumb" aria-hidden="true"></span>
          </span>
        </button>
      </div>
    </header>
    <main>
      <h1 class="page-title" data-fr="{title_fr}" data-en="{title_en}"></h1>
      <table class="info-table">
        <tbody>
          <tr>
            <th data-fr="Identifiant" data-en="Identifier"></th>
            <td>{id}</td>
          </tr>
          <tr>
            <th data-fr="Script associé" data-en="Associated script"></th>
            <td>{script}</td>
          </tr>
          <tr>
            <th data-fr="Niveau de criticité" data-en="Criticality level"></th>
            <td><span class="level-pill level-{level}">{level}</span></td>
          </tr>
        </tbody>
      </table>
      <section class="content-section">
        <h2 data-fr="Explications" data-en="Overview"></h2>
        <p data-fr="{description_fr}" data-en="{description_en}"></p>
      </section>
      <section class="content-section">
        <h2 data-fr="Résolution" data-en="Remediation"></h2>
        <p data-fr="{resolution_fr}" data-en="{resolution_en}"></p>
      </section>
      <a class="return-button" href="../index.html" data-fr="Retour à la liste" data-en="Back to list"></a>
    </main>
    <footer class="primary-footer">
      <div class="footer-brand">MAESTRIA</div>
      <div class="footer-links">
        <div class="footer-column">
          <h3 data-fr="Support" data-en="Support"></h3>
          <ul>
            <li><span data-fr="Centre de services" data-en="Service desk"></span></li>
            <li><span data-fr="Documentation technique" data-en="Technical documentation"></span></li>
          </ul>
        </div>
        <div class="footer-column">
          <h3 data-fr="Mentions" data-en="Legal"></h3>
          <ul>
            <li><span data-fr="Mentions légales" data-en="Legal notice"></span></li>
            <li><span data-fr="Politique de confidentialité" data-en="Privacy policy"></span></li>
          </ul>
        </div>
      </div>
    </footer>
    <script src="../assets/js/script.js"></script>
  </body>
</html>
"#;

/// Escape a registry string for interpolation into HTML text or a
/// double-quoted attribute. Applied to every substituted value without
/// exception; the catalog is hand-edited configuration.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every `{name}` placeholder with its field value. A placeholder
/// with no field is a hard error so the template and the record schema
/// cannot drift apart silently.
pub fn fill_placeholders(template: &str, fields: &BTreeMap<&str, String>) -> CoreResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            CoreError::Template("unterminated placeholder in template".to_string())
        })?;
        let name = &after[..end];
        let value = fields.get(name).ok_or_else(|| {
            CoreError::Template(format!(
                "placeholder {{{}}} has no corresponding registry field",
                name
            ))
        })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Render one validated check into its standalone detail page.
pub fn render_detail_page(check: &ValidatedCheck) -> CoreResult<String> {
    let mut fields: BTreeMap<&str, String> = BTreeMap::new();
    fields.insert("id", escape_html(&check.id));
    fields.insert("script", escape_html(&check.script_ref));
    fields.insert("level", escape_html(check.level.as_str()));
    fields.insert("title_fr", escape_html(&check.title.fr));
    fields.insert("title_en", escape_html(&check.title.en));
    fields.insert("description_fr", escape_html(&check.description.fr));
    fields.insert("description_en", escape_html(&check.description.en));
    fields.insert("resolution_fr", escape_html(&check.resolution.fr));
    fields.insert("resolution_en", escape_html(&check.resolution.en));
    fill_placeholders(DETAIL_TEMPLATE, &fields)
}
