use anyhow::bail;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use wasm_bindgen::JsCast;
use web_sys::{js_sys, EventTarget, HtmlInputElement};
use yew::prelude::*;

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(PartialEq, Properties, Debug)]
pub struct Props {
    pub id: String,
    pub value: Option<DateTime<Utc>>,
    #[prop_or_default]
    pub class: Classes,
    pub on_change: Callback<Option<DateTime<Utc>>>,
}

/// `datetime-local` input edited in browser time and reported in UTC.
#[function_component(InputDateTimeUtc)]
pub fn input_datetime_utc(props: &Props) -> Html {
    let callback = props.on_change.clone();

    let value_string = match (props.value, browser_offset()) {
        (Some(value), Ok(offset)) => value.with_timezone(&offset).format(INPUT_FORMAT).to_string(),
        _ => String::new(),
    };

    let on_change = Callback::from(move |event: Event| {
        let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
        let value_string: String = target.unchecked_into::<HtmlInputElement>().value();
        if value_string.trim().is_empty() {
            callback.emit(None);
            return;
        }
        match local_to_utc(&value_string) {
            Ok(datetime_utc) => callback.emit(Some(datetime_utc)),
            Err(error) => log::error!(
                "Fail to convert date to utc, string: {value_string}, error: {error}, doing nothing"
            ),
        }
    });

    html! {
        <input
            id={props.id.clone()}
            value={value_string}
            type="datetime-local"
            class={props.class.clone()}
            onchange={on_change} />
    }
}

fn browser_offset() -> anyhow::Result<FixedOffset> {
    // getTimezoneOffset is UTC minus local, in minutes
    let offset_in_minutes = js_sys::Date::new_0().get_timezone_offset() as i32;
    FixedOffset::west_opt(offset_in_minutes * 60)
        .ok_or_else(|| anyhow::anyhow!("Fail to convert offset from js, value: {offset_in_minutes}"))
}

fn local_to_utc(raw_datetime: &str) -> anyhow::Result<DateTime<Utc>> {
    let naive_parsed = NaiveDateTime::parse_from_str(raw_datetime, INPUT_FORMAT)
        .map_err(|error| anyhow::anyhow!("Fail to parse naive date: {raw_datetime}, error: {error}"))?;
    let datetime = match naive_parsed.and_local_timezone(browser_offset()?) {
        chrono::offset::LocalResult::Single(datetime) => datetime,
        chrono::offset::LocalResult::Ambiguous(earliest, latest) => {
            bail!("Ambiguous dates, earliest: {earliest}, latest: {latest}")
        }
        chrono::offset::LocalResult::None => bail!("Invalid local date, input: {raw_datetime}"),
    };
    Ok(datetime.to_utc())
}
