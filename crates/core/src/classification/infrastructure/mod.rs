pub mod onnx_emotion_classifier;
