// Close-price polyline with a last-price marker on the right axis.
#![allow(non_snake_case)]
use super::candlestick::PriceScale;
use dioxus::prelude::*;

pub fn polyline_points(closes: &[f64], scale: &PriceScale, margin_left: f64, plot_width: f64) -> String {
    if closes.is_empty() {
        return String::new();
    }
    let slot = plot_width / closes.len() as f64;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| format!("{:.2},{:.2}", margin_left + slot * i as f64 + slot / 2.0, scale.y(close)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn PriceLine(
    closes: Vec<f64>,
    scale: PriceScale,
    margin_left: f64,
    plot_width: f64,
    color: String,
    label_color: String,
) -> Element {
    let Some(&last) = closes.last() else {
        return None;
    };
    let points = polyline_points(&closes, &scale, margin_left, plot_width);
    let y = scale.y(last);
    let x_end = margin_left + plot_width;
    let label_x = x_end + 4.0;
    let label_y = y + 4.0;

    rsx! {
        g {
            class: "price-line",
            polyline { points: "{points}", fill: "none", stroke: "{color}", stroke_width: "1", opacity: "0.35" }
            line { x1: "{margin_left}", y1: "{y:.2}", x2: "{x_end:.2}", y2: "{y:.2}", stroke: "{color}", stroke_dasharray: "2 3" }
            text { x: "{label_x:.2}", y: "{label_y:.2}", fill: "{label_color}", font_size: "11px", "{last:.2}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_points_centered_in_slots() {
        let scale = PriceScale { min: 0.0, max: 10.0, top: 0.0, height: 100.0 };
        let points = polyline_points(&[10.0, 0.0], &scale, 0.0, 40.0);
        assert_eq!(points, "10.00,0.00 30.00,100.00");
        assert_eq!(polyline_points(&[], &scale, 0.0, 40.0), "");
    }
}
