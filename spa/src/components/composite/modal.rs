use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub footer: Html,
    #[prop_or_default]
    pub children: Html,
}

/// Dialog shown while it is mounted.
#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <>
            <div class="modal d-block" tabindex="-1" role="dialog">
                <div class="modal-dialog modal-dialog-centered">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{props.title.clone()}</h5>
                            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
                        </div>
                        <div class="modal-body">
                            {props.children.clone()}
                        </div>
                        <div class="modal-footer">
                            {props.footer.clone()}
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop show"></div>
        </>
    }
}
