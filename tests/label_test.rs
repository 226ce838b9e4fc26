use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use storefront::label::{LabelRenderer, encode_code128};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
// Well below the name line, inside the bar band
const SCAN_ROW: u32 = 100;

// Code 128 bar/space widths for the symbols used below
const START_B: [u32; 6] = [2, 1, 1, 2, 1, 4];
const STOP: [u32; 7] = [2, 3, 3, 1, 1, 1, 2];
const SET_B: [(char, [u32; 6]); 6] = [
    ('A', [1, 1, 1, 3, 2, 3]),
    ('B', [1, 3, 1, 1, 2, 3]),
    ('C', [1, 3, 1, 3, 2, 1]),
    ('1', [1, 2, 3, 2, 2, 1]),
    ('2', [2, 2, 3, 2, 1, 1]),
    ('3', [2, 2, 1, 1, 3, 2]),
];

fn is_black(img: &RgbImage, x: u32, y: u32) -> bool {
    *img.get_pixel(x, y) == BLACK
}

/// Run lengths along `SCAN_ROW` from the first bar to the last one
fn scan_runs(img: &RgbImage) -> Vec<u32> {
    let inner = 2..img.width() - 2;
    let first = inner.clone().find(|&x| is_black(img, x, SCAN_ROW)).unwrap();
    let last = inner.rev().find(|&x| is_black(img, x, SCAN_ROW)).unwrap();

    let mut runs = Vec::new();
    let mut current = is_black(img, first, SCAN_ROW);
    let mut length = 0;
    for x in first..=last {
        if is_black(img, x, SCAN_ROW) == current {
            length += 1;
        } else {
            runs.push(length);
            current = !current;
            length = 1;
        }
    }
    runs.push(length);
    runs
}

fn decode(widths: &[u32]) -> String {
    assert_eq!(&widths[..6], &START_B);
    assert_eq!(&widths[widths.len() - 7..], &STOP);

    let symbols: Vec<&[u32]> = widths[6..widths.len() - 7].chunks(6).collect();
    // Last symbol before the stop is the checksum
    let (checksum, data) = symbols.split_last().unwrap();
    assert_eq!(checksum.iter().sum::<u32>(), 11);

    data.iter()
        .map(|symbol| {
            SET_B
                .iter()
                .find(|(_, pattern)| pattern.as_slice() == *symbol)
                .map(|(c, _)| *c)
                .expect("known symbol")
        })
        .collect()
}

#[test]
fn test_label_dimensions_and_border() {
    let label = LabelRenderer::default()
        .render("ABC123", "Widget", 300, 200)
        .unwrap();
    assert_eq!(label.dimensions(), (300, 200));

    for x in 0..300 {
        assert!(is_black(&label, x, 0));
        assert!(is_black(&label, x, 199));
    }
    for y in 0..200 {
        assert!(is_black(&label, 0, y));
        assert!(is_black(&label, 299, y));
    }
    assert_eq!(*label.get_pixel(5, 195), Rgb([255, 255, 255]));
}

#[test]
fn test_label_barcode_decodes() {
    let label = LabelRenderer::default()
        .render("ABC123", "Widget", 300, 200)
        .unwrap();

    let runs = scan_runs(&label);
    let module_width = runs.iter().copied().min().unwrap();
    assert!(runs.iter().all(|r| r % module_width == 0));
    let widths: Vec<u32> = runs.iter().map(|r| r / module_width).collect();

    assert_eq!(widths.iter().sum::<u32>() as usize, encode_code128("ABC123").unwrap().len());
    assert_eq!(decode(&widths), "ABC123");
}

fn barcode_text(label: &RgbImage) -> String {
    let runs = scan_runs(label);
    let module_width = runs.iter().copied().min().unwrap();
    let widths: Vec<u32> = runs.iter().map(|r| r / module_width).collect();
    decode(&widths)
}

#[test]
fn test_label_with_logo() {
    // Left half opaque red, right half fully transparent
    let logo = RgbaImage::from_fn(100, 100, |x, _| {
        if x < 50 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let renderer = LabelRenderer::new(Some(DynamicImage::ImageRgba8(logo)));
    let label = renderer.render("ABC123", "Widget", 300, 200).unwrap();
    assert_eq!(label.dimensions(), (300, 200));

    // 50x50 logo centred horizontally, just under the top border
    let (left, top) = (125, 8);
    for (x, y) in [(left + 5, top + 5), (left + 10, top + 25), (left + 5, top + 45)] {
        let Rgb([r, g, b]) = *label.get_pixel(x, y);
        assert!(r > 200 && g < 60 && b < 60, "expected red at ({x}, {y})");
    }
    // Transparent logo pixels are flattened onto white
    assert_eq!(*label.get_pixel(left + 45, top + 25), Rgb([255, 255, 255]));
    assert_eq!(*label.get_pixel(left - 5, top + 25), Rgb([255, 255, 255]));

    assert_eq!(barcode_text(&label), "ABC123");
}

#[test]
fn test_label_rejects_unencodable_barcode() {
    assert!(
        LabelRenderer::default()
            .render("ÄBC", "Widget", 300, 200)
            .is_err()
    );
}

#[test]
fn test_label_clips_small_canvas() {
    let label = LabelRenderer::default()
        .render("ABC123", "A very long product name indeed", 40, 30)
        .unwrap();
    assert_eq!(label.dimensions(), (40, 30));
}

#[test]
fn test_label_png_output() {
    let png = LabelRenderer::default()
        .render_png("1001", "Rice", 300, 200)
        .unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (300, 200));
}
