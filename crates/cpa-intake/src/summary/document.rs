use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::encoding::encode_line;
use super::layout::{wrap_text, FontFace};
use super::RenderError;

const MM: f32 = 72.0 / 25.4;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 10.0 * MM;
const BOTTOM_MARGIN: f32 = 20.0 * MM;
const CELL_PADDING: f32 = 1.0 * MM;

const TITLE_SIZE: f32 = 16.0;
const TITLE_CELL_HEIGHT: f32 = 10.0 * MM;
const TITLE_GAP: f32 = 10.0 * MM;

const BODY_SIZE: f32 = 12.0;
const BODY_LINE_HEIGHT: f32 = 8.0 * MM;

/// A4 document made of one bold centered title followed by wrapped body text.
///
/// Positions are tracked top-down from the page edge and flipped into PDF user
/// space only when an operation is emitted.
pub(crate) struct SummaryLayout<'a> {
    pub(crate) title: &'a str,
    pub(crate) body: &'a str,
}

impl SummaryLayout<'_> {
    pub(crate) fn to_pdf(&self) -> Result<Vec<u8>, RenderError> {
        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        let mut pages = vec![Vec::new()];
        let mut cursor = MARGIN;

        let title_width = FontFace::Bold.text_width(self.title, TITLE_SIZE);
        let title_x = MARGIN + ((content_width - title_width) / 2.0).max(CELL_PADDING);
        push_text(
            current_page(&mut pages),
            FontFace::Bold,
            TITLE_SIZE,
            title_x,
            baseline(cursor, TITLE_CELL_HEIGHT, TITLE_SIZE),
            self.title,
        )?;
        cursor += TITLE_CELL_HEIGHT + TITLE_GAP;

        let wrap_width = content_width - 2.0 * CELL_PADDING;
        for line in wrap_text(self.body, FontFace::Regular, BODY_SIZE, wrap_width) {
            if cursor + BODY_LINE_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
                pages.push(Vec::new());
                cursor = MARGIN;
            }
            if !line.is_empty() {
                push_text(
                    current_page(&mut pages),
                    FontFace::Regular,
                    BODY_SIZE,
                    MARGIN + CELL_PADDING,
                    baseline(cursor, BODY_LINE_HEIGHT, BODY_SIZE),
                    &line,
                )?;
            }
            cursor += BODY_LINE_HEIGHT;
        }

        assemble(pages)
    }
}

fn current_page(pages: &mut Vec<Vec<Operation>>) -> &mut Vec<Operation> {
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    let last = pages.len() - 1;
    &mut pages[last]
}

/// Baseline of text vertically centered in a cell whose top edge sits at `top`.
fn baseline(top: f32, cell_height: f32, size: f32) -> f32 {
    top + cell_height / 2.0 + 0.3 * size
}

fn push_text(
    operations: &mut Vec<Operation>,
    face: FontFace,
    size: f32,
    x: f32,
    top_down_baseline: f32,
    text: &str,
) -> Result<(), RenderError> {
    let encoded = encode_line(text).map_err(|character| RenderError::UnsupportedCharacter {
        character,
        field: "summary",
    })?;

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(face.resource_name().to_vec()), Object::Real(size)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![
            Object::Real(x),
            Object::Real(PAGE_HEIGHT - top_down_baseline),
        ],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(encoded, StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
    Ok(())
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(PAGE_WIDTH),
        Object::Real(PAGE_HEIGHT),
    ]
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let pages_id: ObjectId = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Regular));
    let bold_id = doc.add_object(font_dictionary(FontFace::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|err| RenderError::Pdf(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    Ok(bytes)
}
