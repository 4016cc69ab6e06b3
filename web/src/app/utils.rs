use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(in crate::app) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children into `document.body` so the dialog overlays the page
/// instead of sitting inside the grid markup.
#[function_component]
pub(in crate::app) fn Modal(props: &ModalProps) -> Html {
    create_portal(props.children.clone(), gloo::utils::body().into())
}

/// Seed for the mole source, drawn from JavaScript's `Math.random`, one byte
/// per call since a single call only carries 52 bits of entropy.
pub(in crate::app) fn js_random_seed() -> u64 {
    let bytes: [u8; 8] = std::array::from_fn(|_| (js_sys::Math::random() * 256.) as u8);
    u64::from_be_bytes(bytes)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn random_seeds_vary_between_calls() {
        let seeds: [u64; 4] = std::array::from_fn(|_| js_random_seed());
        assert!(seeds.windows(2).any(|pair| pair[0] != pair[1]));
    }
}
