use gtner_core::ConverterConfig;
use gtner_lambda::{
    ComprehendHandler, ConllHandler, HandlerError, InvocationContext, S3Event,
};
use gtner_store::{LocalStore, MemoryStore, ObjectStore, S3Uri, Tag};

const BUCKET: &str = "vm-gtner-blog";
const KEY: &str = "gt/my job/manifests/output/output.manifest";
const ENCODED_KEY: &str = "gt/my+job/manifests/output/output.manifest";

const MANIFEST: &str = concat!(
    r#"{"source":"Alice visited Paris.\nBob stayed home.","my-job":{"annotations":{"entities":[{"startOffset":14,"endOffset":19,"label":"city"},{"startOffset":0,"endOffset":5,"label":"person"}],"labels":[{"label":"city","shortDisplayName":"LOC"},{"label":"person","shortDisplayName":"PER"}]}},"my-job-metadata":{"entities":[{"confidence":0.9},{"confidence":0.8}]}}"#,
    "\n",
    "\n",
    r#"{"source":"No entities here","my-job":{"annotations":{"entities":[],"labels":[]}},"my-job-metadata":{"entities":[]}}"#,
    "\n",
);

fn ctx() -> InvocationContext {
    InvocationContext::new(
        "req-42",
        "/aws/lambda/conll-converter",
        "2024/05/01/[$LATEST]0123abcd",
    )
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(&S3Uri::new(BUCKET, KEY), MANIFEST);
    store
}

#[tokio::test]
async fn conll_handler_writes_iob_and_tags_input() {
    let handler =
        ConllHandler::new(seeded_store(), ConverterConfig::new().with_attr("my-job")).unwrap();
    let response = handler
        .handle(&S3Event::for_object(BUCKET, ENCODED_KEY), &ctx())
        .await
        .unwrap();

    assert_eq!(
        response.files.input_file,
        format!("s3://{BUCKET}/{KEY}")
    );
    assert_eq!(
        response.files.output_file,
        format!("s3://{BUCKET}/gt/my job/manifests/output/output.iob")
    );
    assert_eq!(response.lambda.lambda_log_stream_trs, "2024/05/01/__LATEST_0123abcd");

    let output = handler
        .store()
        .body(&S3Uri::new(BUCKET, "gt/my job/manifests/output/output.iob"))
        .unwrap();
    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Alice _ _ U-PER",
            "visited _ _ O",
            "Paris _ _ U-LOC",
            ". _ _ O",
            "",
            "Bob _ _ O",
            "stayed _ _ O",
            "home _ _ O",
            ". _ _ O",
            "",
            "No _ _ O",
            "entities _ _ O",
            "here _ _ O",
            "",
        ]
    );

    let tags = handler.store().tags(&S3Uri::new(BUCKET, KEY)).unwrap();
    assert_eq!(
        tags,
        vec![
            Tag::new("lambda_req_id", "req-42"),
            Tag::new("lambda_log_group", "/aws/lambda/conll-converter"),
            Tag::new("lambda_log_stream", "2024/05/01/__LATEST_0123abcd"),
        ]
    );
}

#[tokio::test]
async fn conll_handler_rerun_does_not_duplicate_tags() {
    let handler =
        ConllHandler::new(seeded_store(), ConverterConfig::new().with_attr("my-job")).unwrap();
    let event = S3Event::for_object(BUCKET, ENCODED_KEY);
    handler.handle(&event, &ctx()).await.unwrap();
    handler
        .handle(&event, &InvocationContext::new("req-43", "g", "s"))
        .await
        .unwrap();

    let tags = handler.store().tags(&S3Uri::new(BUCKET, KEY)).unwrap();
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[0], Tag::new("lambda_req_id", "req-43"));
}

#[tokio::test]
async fn conll_handler_bio_codec() {
    let handler = ConllHandler::new(
        seeded_store(),
        ConverterConfig::new().with_attr("my-job").with_codec("OIB"),
    )
    .unwrap();
    handler
        .handle(&S3Event::for_object(BUCKET, ENCODED_KEY), &ctx())
        .await
        .unwrap();

    let output = handler
        .store()
        .body(&S3Uri::new(BUCKET, "gt/my job/manifests/output/output.iob"))
        .unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with("Alice _ _ B-PER\n"));
    assert!(!output.contains("U-"));
}

#[test]
fn conll_handler_rejects_unknown_codec() {
    let result = ConllHandler::new(MemoryStore::new(), ConverterConfig::new().with_codec("iobes"));
    assert!(matches!(result, Err(HandlerError::Convert(_))));
}

#[tokio::test]
async fn conll_handler_bad_manifest_writes_nothing() {
    let store = MemoryStore::new();
    let input = S3Uri::new(BUCKET, "bad.manifest");
    store.insert(&input, "{\"source\":\"ok\"}\nnot json\n");

    let handler = ConllHandler::new(store, ConverterConfig::new()).unwrap();
    let err = handler
        .handle(&S3Event::for_object(BUCKET, "bad.manifest"), &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Convert(_)));
    assert!(handler.store().body(&S3Uri::new(BUCKET, "bad.iob")).is_none());
}

#[tokio::test]
async fn conll_handler_missing_object() {
    let handler = ConllHandler::new(MemoryStore::new(), ConverterConfig::new()).unwrap();
    let err = handler
        .handle(&S3Event::for_object(BUCKET, "missing.manifest"), &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Store(_)));
}

#[tokio::test]
async fn empty_event_is_rejected() {
    let handler = ComprehendHandler::new(MemoryStore::new());
    let event: S3Event = serde_json::from_str(r#"{"Records":[]}"#).unwrap();
    let err = handler.handle(&event, &ctx()).await.unwrap_err();
    assert!(matches!(err, HandlerError::NoRecords));
}

#[tokio::test]
async fn comprehend_handler_writes_dataset() {
    let handler = ComprehendHandler::new(seeded_store());
    let response = handler
        .handle(&S3Event::for_object(BUCKET, ENCODED_KEY), &ctx())
        .await
        .unwrap();

    let folder = "gt/my job/manifests/output";
    assert_eq!(
        response.files.data_file,
        format!("s3://{BUCKET}/{folder}/comprehend/documents/output.txt")
    );
    assert_eq!(
        response.files.ann_file,
        format!("s3://{BUCKET}/{folder}/comprehend/annotations/output.csv")
    );
    assert_eq!(response.lambda.lambda_log_stream_raw, "2024/05/01/[$LATEST]0123abcd");

    let data = handler
        .store()
        .body(&S3Uri::new(BUCKET, format!("{folder}/comprehend/documents/output.txt")))
        .unwrap();
    assert_eq!(
        String::from_utf8(data).unwrap(),
        "\"Alice visited Paris.\nBob stayed home.\"\nNo entities here\n"
    );

    let ann = handler
        .store()
        .body(&S3Uri::new(BUCKET, format!("{folder}/comprehend/annotations/output.csv")))
        .unwrap();
    assert_eq!(
        String::from_utf8(ann).unwrap(),
        "File,Line,Begin Offset,End Offset,Type\n\
         output.txt,0,14,19,CITY\n\
         output.txt,0,0,5,PERSON\n"
    );
}

#[tokio::test]
async fn comprehend_handler_response_json() {
    let handler = ComprehendHandler::new(seeded_store());
    let response = handler
        .handle(&S3Event::for_object(BUCKET, ENCODED_KEY), &ctx())
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["lambda"]["lambda_req_id"], "req-42");
    assert!(json["files"]["ann_file"].as_str().unwrap().ends_with(".csv"));
    assert!(json["metadata"]["gtner-core"].is_string());
}

#[tokio::test]
async fn handlers_run_against_local_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    store
        .put_object(&S3Uri::new(BUCKET, KEY), MANIFEST.as_bytes().to_vec())
        .await
        .unwrap();

    let handler = ConllHandler::new(store, ConverterConfig::new().with_attr("my-job")).unwrap();
    handler
        .handle(&S3Event::for_object(BUCKET, ENCODED_KEY), &ctx())
        .await
        .unwrap();

    let iob = handler
        .store()
        .get_object(&S3Uri::new(BUCKET, "gt/my job/manifests/output/output.iob"))
        .await
        .unwrap();
    assert!(String::from_utf8(iob).unwrap().starts_with("Alice _ _ U-PER\n"));
}
