use yew::prelude::*;

use crate::app::RoundReport;
use crate::app::utils::Modal;

#[derive(Properties, PartialEq)]
pub(in crate::app) struct SummaryProps {
    #[prop_or_default]
    pub report: Option<RoundReport>,
    pub on_dismiss: Callback<MouseEvent>,
}

/// End-of-round notification, shown as a modal dialog over the grid.
#[function_component]
pub(in crate::app) fn SummaryView(props: &SummaryProps) -> Html {
    let Some(report) = props.report else {
        return Html::default();
    };

    html! {
        <Modal>
            <dialog id="summary" open={true}>
                <article>
                    <h2>{"You caught the mole!"}</h2>
                    <p>
                        { format!(
                            "It took you {} seconds and you missed {} times.",
                            report.elapsed_secs, report.miss_count,
                        ) }
                    </p>
                    <footer>
                        <button onclick={props.on_dismiss.clone()}>{"OK"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}
