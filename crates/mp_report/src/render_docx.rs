// crates/mp_report/src/render_docx.rs
//
// Deterministic WordprocessingML body renderer.
//
// Each section is a pure function from its model block to a fragment list;
// `render_body` concatenates them in document order:
// header → title → info → quorum → agenda → items → attribution →
// page break → appendix → footer.
//
// All user/content fields pass through `esc`. Images stay symbolic
// (`MarkupFragment::Image`) and are resolved by the package assembler.

use mp_core::{ImageKey, ImageRef, Markup, MarkupFragment};

use crate::format::{distribute_widths, esc};
use crate::model::*;
use crate::phrases;

/// A4 width minus 2 cm side margins, in twips.
pub const TABLE_WIDTH_TWIPS: u32 = 9638;

const COLOR_AFFIRMATIVE: &str = "2E7D32";
const COLOR_WARNING: &str = "C62828";
const COLOR_MUTED: &str = "595959";
const FONT: &str = "Times New Roman";

const VOTER_COLUMNS_WITH_JUSTIFICATION: [u32; 7] = [5, 24, 12, 11, 12, 14, 22];
const VOTER_COLUMNS: [u32; 6] = [5, 24, 12, 11, 12, 14];
const ROSTER_COLUMNS: [u32; 5] = [6, 34, 16, 16, 28];

// ------------------------- run / paragraph primitives -------------------------

#[derive(Clone, Copy)]
struct Style {
    bold: bool,
    italic: bool,
    /// Half-points.
    size: u32,
    color: Option<&'static str>,
}

const NORMAL: Style = Style { bold: false, italic: false, size: 24, color: None };
const BOLD: Style = Style { bold: true, ..NORMAL };
const SMALL: Style = Style { size: 20, ..NORMAL };
const SMALL_BOLD: Style = Style { bold: true, ..SMALL };
const TITLE: Style = Style { bold: true, size: 28, ..NORMAL };
const FOOTNOTE: Style = Style { size: 18, color: Some(COLOR_MUTED), ..NORMAL };
const NOTE: Style = Style { italic: true, size: 20, ..NORMAL };

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Both,
}

impl Align {
    fn token(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Both => "both",
        }
    }
}

fn rpr(st: Style) -> String {
    format!(
        "<w:rPr><w:rFonts w:ascii=\"{FONT}\" w:hAnsi=\"{FONT}\" w:cs=\"{FONT}\"/>{}{}{}<w:sz w:val=\"{sz}\"/><w:szCs w:val=\"{sz}\"/></w:rPr>",
        if st.bold { "<w:b/>" } else { "" },
        if st.italic { "<w:i/>" } else { "" },
        st.color.map(|c| format!("<w:color w:val=\"{c}\"/>")).unwrap_or_default(),
        sz = st.size,
    )
}

/// One run; line breaks in `text` become `<w:br/>`.
fn run(text: &str, st: Style) -> String {
    let body = text
        .split('\n')
        .map(|line| format!("<w:t xml:space=\"preserve\">{}</w:t>", esc(line.trim_end_matches('\r'))))
        .collect::<Vec<_>>()
        .join("<w:br/>");
    format!("<w:r>{}{body}</w:r>", rpr(st))
}

fn para(runs: &[String], align: Align, after: u32) -> String {
    format!(
        "<w:p><w:pPr><w:spacing w:before=\"0\" w:after=\"{after}\"/><w:jc w:val=\"{}\"/></w:pPr>{}</w:p>",
        align.token(),
        runs.concat()
    )
}

fn text_para(text: &str, st: Style, align: Align) -> String {
    para(&[run(text, st)], align, 120)
}

/// `Label: value` with a bold label.
fn labeled(label: &str, value: &str) -> String {
    para(&[run(&format!("{label}: "), BOLD), run(value, NORMAL)], Align::Left, 60)
}

fn page_break() -> String {
    "<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>".to_string()
}

// ------------------------- tables -------------------------

fn table_open(widths: &[u32]) -> String {
    let border = |side: &str| format!("<w:{side} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"000000\"/>");
    let grid: String = widths.iter().map(|w| format!("<w:gridCol w:w=\"{w}\"/>")).collect();
    format!(
        "<w:tbl><w:tblPr><w:tblW w:w=\"{TABLE_WIDTH_TWIPS}\" w:type=\"dxa\"/><w:tblBorders>{}{}{}{}{}{}</w:tblBorders>\
         <w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>{grid}</w:tblGrid>",
        border("top"),
        border("left"),
        border("bottom"),
        border("right"),
        border("insideH"),
        border("insideV"),
    )
}

const TABLE_CLOSE: &str = "</w:tbl>";

fn cell_open(width: u32) -> String {
    format!("<w:tc><w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/></w:tcPr>")
}

fn cell(width: u32, text: &str, st: Style, align: Align) -> String {
    format!("{}{}</w:tc>", cell_open(width), para(&[run(text, st)], align, 0))
}

fn row(cells: &[String], header: bool) -> String {
    let pr = if header { "<w:trPr><w:tblHeader/></w:trPr>" } else { "" };
    format!("<w:tr>{pr}{}</w:tr>", cells.concat())
}

fn text_table(weights: &[u32], header: &[&str], body: &[Vec<(String, Align)>]) -> String {
    let widths = distribute_widths(weights, TABLE_WIDTH_TWIPS);
    let head: Vec<String> = header
        .iter()
        .zip(&widths)
        .map(|(h, w)| cell(*w, h, SMALL_BOLD, Align::Center))
        .collect();
    let mut out = table_open(&widths);
    out.push_str(&row(&head, true));
    for r in body {
        let cells: Vec<String> = r.iter().zip(&widths).map(|((t, a), w)| cell(*w, t, SMALL, *a)).collect();
        out.push_str(&row(&cells, false));
    }
    out.push_str(TABLE_CLOSE);
    out
}

fn xml(s: String) -> MarkupFragment {
    MarkupFragment::Xml(s)
}

// ------------------------- sections -------------------------

fn section_header(h: &HeaderBlock) -> Vec<MarkupFragment> {
    vec![xml([text_para(&h.boilerplate, NOTE, Align::Center), text_para(&h.citation, NOTE, Align::Both)].concat())]
}

fn section_title(t: &TitleBlock) -> Vec<MarkupFragment> {
    vec![xml(
        [
            text_para(&format!("{} {}", phrases::TITLE_PROTOCOL, t.number), TITLE, Align::Center),
            text_para(&t.heading, BOLD, Align::Center),
            text_para(&format!("{} {}", phrases::TITLE_ADDRESS, t.address), NORMAL, Align::Center),
            text_para(&t.format_phrase, NORMAL, Align::Center),
        ]
        .concat(),
    )]
}

fn section_info(i: &MeetingInfo) -> Vec<MarkupFragment> {
    vec![xml(
        [
            labeled(phrases::INFO_DATE, &i.date),
            labeled(phrases::INFO_TIME, &i.time),
            labeled(phrases::INFO_VENUE, &i.venue),
        ]
        .concat(),
    )]
}

fn section_quorum(q: &QuorumBlock) -> Vec<MarkupFragment> {
    let (statement, color) = if q.reached {
        (phrases::QUORUM_REACHED, COLOR_AFFIRMATIVE)
    } else {
        (phrases::QUORUM_MISSING, COLOR_WARNING)
    };
    vec![xml(
        [
            text_para(phrases::QUORUM_HEADING, BOLD, Align::Left),
            labeled(phrases::QUORUM_TOTAL_AREA, &format!("{} {}", q.total_area, phrases::UNIT_SQM)),
            labeled(phrases::QUORUM_VOTED_AREA, &format!("{} {}", q.voted_area, phrases::UNIT_SQM)),
            labeled(phrases::QUORUM_PARTICIPATION, &format!("{} %", q.participation_pct)),
            labeled(phrases::QUORUM_COUNTS, &format!("{} из {}", q.participated, q.eligible)),
            labeled(phrases::QUORUM_THRESHOLD, &format!("более {} %", q.threshold_pct)),
            text_para(statement, Style { color: Some(color), ..BOLD }, Align::Left),
        ]
        .concat(),
    )]
}

fn section_agenda(lines: &[AgendaLine]) -> Vec<MarkupFragment> {
    let mut out = text_para(phrases::AGENDA_HEADING, BOLD, Align::Left);
    for l in lines {
        out.push_str(&text_para(&format!("{}. {}", l.number, l.title), NORMAL, Align::Both));
    }
    vec![xml(out)]
}

fn section_item(s: &ItemSection) -> Vec<MarkupFragment> {
    let mut out = text_para(&format!("{}. {}", s.number, s.title), BOLD, Align::Left);
    match &s.body {
        ItemBody::ElectChair { chair } => {
            out.push_str(&text_para(phrases::ELECT_CHAIR_NOTE, NORMAL, Align::Both));
            out.push_str(&labeled(phrases::ELECT_CHAIR_CHAIR, chair));
            out.push_str(&labeled(phrases::ELECT_CHAIR_SECRETARY, "______________________"));
        }
        ItemBody::Voted { description, tally, approved, voters } => {
            if let Some(d) = description {
                out.push_str(&text_para(d, NORMAL, Align::Both));
            }
            out.push_str(&text_para(phrases::TALLY_HEADING, BOLD, Align::Left));
            let areas: Vec<(String, Align)> = tally.areas.iter().map(|a| (format!("{a} {}", phrases::UNIT_SQM), Align::Center)).collect();
            let pcts: Vec<(String, Align)> = tally.percents.iter().map(|p| (format!("{p} %"), Align::Center)).collect();
            out.push_str(&text_table(&[1, 1, 1], &phrases::TALLY_COLUMNS, &[areas, pcts]));

            let (verdict, color) = if *approved {
                (phrases::DECISION_APPROVED, COLOR_AFFIRMATIVE)
            } else {
                (phrases::DECISION_REJECTED, COLOR_WARNING)
            };
            out.push_str(&text_para(verdict, Style { color: Some(color), ..BOLD }, Align::Left));

            if let Some(v) = voters {
                out.push_str(&text_para(phrases::VOTERS_HEADING, BOLD, Align::Left));
                out.push_str(&voter_table(v));
            }
        }
    }
    vec![xml(out)]
}

fn voter_table(v: &VoterTable) -> String {
    let mut header = vec![
        phrases::COL_NO,
        phrases::COL_OWNER,
        phrases::COL_UNIT,
        phrases::COL_AREA,
        phrases::COL_CHOICE,
        phrases::COL_TIME,
    ];
    let weights: &[u32] = if v.with_justification {
        header.push(phrases::COL_JUSTIFICATION);
        &VOTER_COLUMNS_WITH_JUSTIFICATION
    } else {
        &VOTER_COLUMNS
    };
    let body: Vec<Vec<(String, Align)>> = v
        .rows
        .iter()
        .map(|r| {
            let mut cells = vec![
                (r.number.to_string(), Align::Center),
                (r.name.clone(), Align::Left),
                (r.unit.clone(), Align::Center),
                (r.area.clone(), Align::Center),
                (r.choice.clone(), Align::Center),
                (r.time.clone(), Align::Center),
            ];
            if v.with_justification {
                cells.push((r.justification.clone().unwrap_or_default(), Align::Left));
            }
            cells
        })
        .collect();
    text_table(weights, &header, &body)
}

fn section_attribution(a: &Attribution, image_mm: u32) -> Vec<MarkupFragment> {
    vec![
        xml(
            [
                labeled(phrases::ATTRIBUTION_ORGANIZER, &a.organizer),
                labeled(phrases::ATTRIBUTION_ORGANIZATION, &a.organization),
                "<w:p><w:pPr><w:spacing w:before=\"120\" w:after=\"120\"/><w:jc w:val=\"left\"/></w:pPr>".to_string(),
            ]
            .concat(),
        ),
        MarkupFragment::Image(ImageRef::square_mm(ImageKey::Organization, image_mm)),
        xml("</w:p>".to_string()),
    ]
}

fn section_appendix(rows: &[RosterRow], image_mm: u32) -> Vec<MarkupFragment> {
    let widths = distribute_widths(&ROSTER_COLUMNS, TABLE_WIDTH_TWIPS);
    let header = [phrases::COL_NO, phrases::COL_OWNER, phrases::COL_UNIT, phrases::COL_AREA, phrases::COL_SIGNATURE];
    let head: Vec<String> = header.iter().zip(&widths).map(|(h, w)| cell(*w, h, SMALL_BOLD, Align::Center)).collect();

    let mut out = vec![xml(format!(
        "{}{}{}",
        text_para(phrases::APPENDIX_HEADING, BOLD, Align::Center),
        table_open(&widths),
        row(&head, true)
    ))];

    for r in rows {
        let text_cells = [
            cell(widths[0], &r.index.to_string(), SMALL, Align::Center),
            cell(widths[1], &r.name, SMALL, Align::Left),
            cell(widths[2], &r.unit, SMALL, Align::Center),
            cell(widths[3], &r.area, SMALL, Align::Center),
        ]
        .concat();
        out.push(xml(format!(
            "<w:tr>{text_cells}{}<w:p><w:pPr><w:spacing w:before=\"60\" w:after=\"60\"/><w:jc w:val=\"center\"/></w:pPr>",
            cell_open(widths[4])
        )));
        out.push(MarkupFragment::Image(ImageRef::square_mm(ImageKey::Voter(r.voter.clone()), image_mm)));
        out.push(xml("</w:p></w:tc></w:tr>".to_string()));
    }

    out.push(xml(TABLE_CLOSE.to_string()));
    out
}

fn section_footer(f: &Footer) -> Vec<MarkupFragment> {
    let mut out = para(&[run(&format!("{}: {}", phrases::FOOTER_GENERATED, f.generated_at), FOOTNOTE)], Align::Left, 0);
    if let Some(h) = &f.integrity_hash {
        out.push_str(&para(&[run(&format!("{}: {h}", phrases::FOOTER_HASH), FOOTNOTE)], Align::Left, 0));
    }
    vec![xml(out)]
}

// ------------------------- top-level entry -------------------------

/// Render the full protocol body in fixed section order.
pub fn render_body(model: &ProtocolModel) -> Markup {
    let items = model.sections.iter().flat_map(section_item).collect();
    Markup::from_sections([
        section_header(&model.header),
        section_title(&model.title),
        section_info(&model.info),
        section_quorum(&model.quorum),
        section_agenda(&model.agenda),
        items,
        section_attribution(&model.attribution, model.organization_image_mm),
        vec![xml(page_break())],
        section_appendix(&model.appendix, model.voter_image_mm),
        section_footer(&model.footer),
    ])
}
